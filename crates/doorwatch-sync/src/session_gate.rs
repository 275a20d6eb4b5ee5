//! 세션 게이트.
//!
//! 세션 수립/해제의 유일한 주체. 세션과 인라인 로그인 에러는
//! 이 컴포넌트만 쓴다. 활성화 직후에는 두 피드를 한 번씩 강제로
//! 풀어, 다음 틱을 기다리지 않고 화면이 채워지게 한다.

use doorwatch_core::error::CoreError;
use doorwatch_core::models::notification::Notification;
use doorwatch_core::models::session::LoginError;
use doorwatch_core::ports::device_api::DeviceApi;
use doorwatch_core::ports::notifier::NotificationSink;
use doorwatch_core::state::DashboardState;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::feed_health::FeedHealth;
use crate::feeds::{EventFeed, StatusFeed};

/// 세션 게이트
pub struct SessionGate {
    api: Arc<dyn DeviceApi>,
    state: Arc<DashboardState>,
    sink: Arc<dyn NotificationSink>,
    status_feed: Arc<StatusFeed>,
    event_feed: Arc<EventFeed>,
    health: Arc<FeedHealth>,
}

impl SessionGate {
    /// 새 세션 게이트 생성
    pub fn new(
        api: Arc<dyn DeviceApi>,
        state: Arc<DashboardState>,
        sink: Arc<dyn NotificationSink>,
        status_feed: Arc<StatusFeed>,
        event_feed: Arc<EventFeed>,
        health: Arc<FeedHealth>,
    ) -> Self {
        Self {
            api,
            state,
            sink,
            status_feed,
            event_feed,
            health,
        }
    }

    /// 시작 시 세션 프로브 — 정확히 한 번, 어떤 폴링보다 먼저 호출된다.
    ///
    /// 쿠키 저장소에 살아 있는 세션 쿠키가 있으면 상태 조회가 성공하고,
    /// 로그인 없이 세션이 활성화된다. 서버가 사용자명을 알려주지 않으므로
    /// identity는 빈 채로 남고, 이후 명시적 로그인이 덮어쓴다.
    pub async fn probe(&self) {
        match self.api.fetch_status().await {
            Ok(_) => {
                info!("세션 프로브 성공 — 기존 세션으로 활성화");
                self.state.activate("");
                self.refresh_now().await;
            }
            Err(e) => {
                debug!("세션 프로브 실패, 로그아웃 상태로 시작: {e}");
            }
        }
    }

    /// 자격증명 로그인
    ///
    /// 실패는 인라인 에러로만 남는다: 서버가 거부하면
    /// `InvalidCredentials`, 서버에 닿지 못하면 `Unreachable`.
    pub async fn login(&self, username: &str, password: &str) {
        match self.api.login(username, password).await {
            Ok(()) => {
                self.state.set_login_error(None);
                self.state.activate(username);
                info!("로그인 성공: {username}");
                self.sink
                    .publish(Notification::success(format!("{username} 로그인 성공")))
                    .await;
                self.refresh_now().await;
            }
            Err(CoreError::Network(e)) => {
                warn!("로그인 요청 도달 실패: {e}");
                self.state.set_login_error(Some(LoginError::Unreachable));
            }
            Err(e) => {
                warn!("로그인 거부: {e}");
                self.state
                    .set_login_error(Some(LoginError::InvalidCredentials));
            }
        }
    }

    /// 로그아웃
    ///
    /// 서버 통지는 베스트 에포트다 — 실패해도 로컬 세션은 무조건
    /// 정리된다 (피드 정지, 상태/이벤트 삭제, 에포크 증가).
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            warn!("로그아웃 통지 실패 (로컬 세션은 정리됨): {e}");
        }
        self.state.deactivate();
        self.health.reset();
        info!("로그아웃 완료");
        self.sink.publish(Notification::info("로그아웃 완료")).await;
    }

    /// 세션 재검증 — 피드 건강 악화 시 호출된다.
    ///
    /// 프로브가 성공하면 건강 카운터만 리셋한다 (일시 장애였던 것).
    /// 실패하면 세션을 강등한다: 로그아웃과 동일한 정리를 수행하되
    /// `/logout` 호출은 하지 않는다 (세션이 이미 죽었다고 보기 때문).
    pub async fn revalidate(&self) {
        if !self.state.is_active() {
            return;
        }

        match self.api.fetch_status().await {
            Ok(_) => {
                debug!("세션 재검증 성공 — 일시 장애로 판단");
                self.health.reset();
            }
            Err(e) => {
                warn!("세션 재검증 실패, 세션 강등: {e}");
                self.state.deactivate();
                self.health.reset();
                self.sink
                    .publish(Notification::error("세션이 만료되어 로그아웃 처리됨"))
                    .await;
            }
        }
    }

    /// 두 피드를 즉시 한 번씩 풀 (틱 스케줄과 무관)
    pub async fn refresh_now(&self) {
        tokio::join!(self.status_feed.pull_once(), self.event_feed.pull_once());
    }
}

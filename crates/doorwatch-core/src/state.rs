//! 대시보드 공유 상태 컨테이너.
//!
//! 모든 컴포넌트에 `Arc`로 주입되는 단일 상태 소유자.
//! 쓰기 권한은 컴포넌트별로 제한된다:
//! - 세션과 인라인 로그인 에러는 세션 게이트만 쓴다.
//! - 상태 스냅샷과 이벤트 목록은 에포크 가드를 거치는 커밋 메서드로만 쓴다.
//!
//! 에포크는 세션 비활성화마다 증가한다. 비활성화 이전에 떠난 요청이
//! 이후에 도착해도, 캡처한 에포크가 더 이상 현재가 아니므로 커밋이
//! 폐기된다 (로그아웃 후 재출현 방지).

use crate::models::event::EventRecord;
use crate::models::session::{LoginError, Session};
use crate::models::status::DeviceStatus;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::debug;

/// 대시보드 공유 상태
#[derive(Debug)]
pub struct DashboardState {
    /// 현재 세션
    session: RwLock<Session>,
    /// 최신 장치 상태 (풀 성공 전·로그아웃 후 None)
    status: RwLock<Option<DeviceStatus>>,
    /// 이벤트 목록 (풀 성공마다 통째로 교체)
    events: RwLock<Vec<EventRecord>>,
    /// 인라인 로그인 에러
    login_error: RwLock<Option<LoginError>>,
    /// 세션 에포크 — 비활성화마다 증가
    epoch: AtomicU64,
    /// `session.active`를 미러링하는 watch 채널 (피드가 대기/중단에 사용)
    active_tx: watch::Sender<bool>,
}

impl DashboardState {
    /// 비활성 세션으로 초기화
    pub fn new() -> Self {
        let (active_tx, _active_rx) = watch::channel(false);
        Self {
            session: RwLock::new(Session::default()),
            status: RwLock::new(None),
            events: RwLock::new(Vec::new()),
            login_error: RwLock::new(None),
            epoch: AtomicU64::new(0),
            active_tx,
        }
    }

    /// 세션 활성 여부
    pub fn is_active(&self) -> bool {
        self.session.read().active
    }

    /// 현재 세션 (복제본)
    pub fn session(&self) -> Session {
        self.session.read().clone()
    }

    /// `active` 플래그 변화 구독
    pub fn subscribe_active(&self) -> watch::Receiver<bool> {
        self.active_tx.subscribe()
    }

    /// 세션 활성화
    ///
    /// 로그인과 프로브 양쪽에서 호출되며, 나중 호출이 identity를 덮어쓴다.
    pub fn activate(&self, identity: &str) {
        {
            let mut session = self.session.write();
            session.active = true;
            session.identity = identity.to_string();
        }
        self.active_tx.send_if_modified(|active| {
            let changed = !*active;
            *active = true;
            changed
        });
    }

    /// 세션 비활성화 및 파생 상태 전체 정리
    ///
    /// 에포크를 먼저 올려, 진행 중인 풀의 커밋이 모두 무효화되게 한다.
    pub fn deactivate(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        {
            let mut session = self.session.write();
            session.active = false;
            session.identity.clear();
        }
        self.status.write().take();
        self.events.write().clear();
        self.active_tx.send_if_modified(|active| {
            let changed = *active;
            *active = false;
            changed
        });
    }

    /// 인라인 로그인 에러 설정/해제
    pub fn set_login_error(&self, error: Option<LoginError>) {
        *self.login_error.write() = error;
    }

    /// 현재 인라인 로그인 에러
    pub fn login_error(&self) -> Option<LoginError> {
        *self.login_error.read()
    }

    /// 풀 시작 — 활성 세션이면 현재 에포크를 캡처한다.
    ///
    /// None이면 비활성 상태이므로 요청을 보내면 안 된다.
    pub fn begin_pull(&self) -> Option<u64> {
        if self.is_active() {
            Some(self.epoch.load(Ordering::Acquire))
        } else {
            None
        }
    }

    /// 상태 스냅샷 커밋 (에포크 가드)
    ///
    /// 캡처한 에포크가 현재와 다르거나 세션이 이미 비활성이면 폐기하고
    /// false를 반환한다.
    pub fn commit_status(&self, epoch: u64, status: DeviceStatus) -> bool {
        let mut guard = self.status.write();
        if !self.commit_allowed(epoch) {
            debug!("세션 종료 후 도착한 상태 응답 폐기");
            return false;
        }
        *guard = Some(status);
        true
    }

    /// 이벤트 목록 커밋 (에포크 가드, 통째 교체)
    pub fn commit_events(&self, epoch: u64, events: Vec<EventRecord>) -> bool {
        let mut guard = self.events.write();
        if !self.commit_allowed(epoch) {
            debug!("세션 종료 후 도착한 이벤트 응답 폐기");
            return false;
        }
        *guard = events;
        true
    }

    /// 최신 장치 상태 (복제본)
    pub fn status(&self) -> Option<DeviceStatus> {
        self.status.read().clone()
    }

    /// 현재 이벤트 목록 (복제본)
    pub fn events(&self) -> Vec<EventRecord> {
        self.events.read().clone()
    }

    fn commit_allowed(&self, epoch: u64) -> bool {
        self.is_active() && epoch == self.epoch.load(Ordering::Acquire)
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

//! 폴링 피드.
//!
//! 상태 피드와 이벤트 피드는 같은 모양의 독립 루프다. 각 피드는
//! `active` watch를 기다리다가 활성화되면 자기 주기의 틱을 시작하고,
//! 비활성화되는 순간 스케줄을 버리고 다시 대기한다.
//!
//! 활성화 직후의 첫 풀은 세션 게이트의 강제 리프레시가 담당하므로,
//! 틱 스케줄은 한 주기 뒤에 시작한다. 강제 리프레시(`pull_once`)는
//! 틱 스케줄에 영향을 주지 않는다.

use doorwatch_core::ports::device_api::DeviceApi;
use doorwatch_core::state::DashboardState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::feed_health::FeedHealth;

/// 장치 상태 폴링 피드
pub struct StatusFeed {
    api: Arc<dyn DeviceApi>,
    state: Arc<DashboardState>,
    health: Arc<FeedHealth>,
    cadence: Duration,
}

impl StatusFeed {
    /// 새 상태 피드 생성
    pub fn new(
        api: Arc<dyn DeviceApi>,
        state: Arc<DashboardState>,
        health: Arc<FeedHealth>,
        cadence: Duration,
    ) -> Self {
        Self {
            api,
            state,
            health,
            cadence,
        }
    }

    /// 상태 한 번 풀
    ///
    /// 세션이 비활성이면 요청 없이 반환한다. 커밋은 에포크 가드를 거치며,
    /// 실패한 풀은 이전 상태를 건드리지 않는다.
    pub async fn pull_once(&self) {
        let Some(epoch) = self.state.begin_pull() else {
            return;
        };

        match self.api.fetch_status().await {
            Ok(status) => {
                if self.state.commit_status(epoch, status) {
                    self.health.record_success();
                }
            }
            Err(e) => {
                warn!("상태 풀 실패: {e}");
                self.health.record_failure();
            }
        }
    }

    /// 폴링 루프 실행 (종료 신호까지)
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        let mut active_rx = self.state.subscribe_active();

        loop {
            // 활성화 대기
            while !*active_rx.borrow() {
                tokio::select! {
                    changed = active_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            return;
                        }
                    }
                }
            }

            debug!("상태 피드 시작 (주기 {:?})", self.cadence);
            let mut ticker = tokio::time::interval_at(
                tokio::time::Instant::now() + self.cadence,
                self.cadence,
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.pull_once().await;
                    }
                    changed = active_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        if !*active_rx.borrow() {
                            debug!("세션 비활성화 — 상태 피드 중단");
                            break;
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            return;
                        }
                    }
                }
            }
        }
    }
}

/// 이벤트 로그 폴링 피드
pub struct EventFeed {
    api: Arc<dyn DeviceApi>,
    state: Arc<DashboardState>,
    health: Arc<FeedHealth>,
    cadence: Duration,
}

impl EventFeed {
    /// 새 이벤트 피드 생성
    pub fn new(
        api: Arc<dyn DeviceApi>,
        state: Arc<DashboardState>,
        health: Arc<FeedHealth>,
        cadence: Duration,
    ) -> Self {
        Self {
            api,
            state,
            health,
            cadence,
        }
    }

    /// 이벤트 목록 한 번 풀
    ///
    /// 성공하면 목록을 통째로 교체한다. 실패(전송, 상태 코드,
    /// `success:false` 본문)는 이전 목록을 유지한다.
    pub async fn pull_once(&self) {
        let Some(epoch) = self.state.begin_pull() else {
            return;
        };

        match self.api.fetch_events().await {
            Ok(events) => {
                if self.state.commit_events(epoch, events) {
                    self.health.record_success();
                }
            }
            Err(e) => {
                warn!("이벤트 풀 실패: {e}");
                self.health.record_failure();
            }
        }
    }

    /// 폴링 루프 실행 (종료 신호까지)
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        let mut active_rx = self.state.subscribe_active();

        loop {
            while !*active_rx.borrow() {
                tokio::select! {
                    changed = active_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            return;
                        }
                    }
                }
            }

            debug!("이벤트 피드 시작 (주기 {:?})", self.cadence);
            let mut ticker = tokio::time::interval_at(
                tokio::time::Instant::now() + self.cadence,
                self.cadence,
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.pull_once().await;
                    }
                    changed = active_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        if !*active_rx.borrow() {
                            debug!("세션 비활성화 — 이벤트 피드 중단");
                            break;
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            return;
                        }
                    }
                }
            }
        }
    }
}

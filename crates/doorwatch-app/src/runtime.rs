//! 동기화 런타임.
//!
//! 피드 태스크 두 개, 건강 감시 태스크, 주기 상태 로그 태스크를 띄우고
//! 종료 신호까지 유지한다. 건강 악화 신호는 여기서 세션 재검증으로
//! 연결된다 — 피드와 게이트는 서로를 모른다.

use doorwatch_core::state::DashboardState;
use doorwatch_sync::{EventFeed, FeedHealth, SessionGate, StatusFeed};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

/// 상태 요약 로그 주기
const STATUS_LOG_INTERVAL: Duration = Duration::from_secs(30);

/// 동기화 런타임
pub struct SyncRuntime {
    state: Arc<DashboardState>,
    status_feed: Arc<StatusFeed>,
    event_feed: Arc<EventFeed>,
    gate: Arc<SessionGate>,
    health: Arc<FeedHealth>,
}

impl SyncRuntime {
    /// 새 런타임 생성
    pub fn new(
        state: Arc<DashboardState>,
        status_feed: Arc<StatusFeed>,
        event_feed: Arc<EventFeed>,
        gate: Arc<SessionGate>,
        health: Arc<FeedHealth>,
    ) -> Self {
        Self {
            state,
            status_feed,
            event_feed,
            gate,
            health,
        }
    }

    /// 모든 태스크를 띄우고 종료 신호까지 대기
    pub async fn run(self, shutdown_rx: watch::Receiver<bool>) {
        let status_task = {
            let feed = self.status_feed.clone();
            let rx = shutdown_rx.clone();
            tokio::spawn(async move { feed.run(rx).await })
        };

        let events_task = {
            let feed = self.event_feed.clone();
            let rx = shutdown_rx.clone();
            tokio::spawn(async move { feed.run(rx).await })
        };

        let health_task = {
            let gate = self.gate.clone();
            let mut degraded_rx = self.health.subscribe();
            let mut rx = shutdown_rx.clone();
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        changed = degraded_rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                            if *degraded_rx.borrow() {
                                gate.revalidate().await;
                            }
                        }
                        _ = rx.changed() => {
                            if *rx.borrow() {
                                return;
                            }
                        }
                    }
                }
            })
        };

        let log_task = {
            let state = self.state.clone();
            let mut rx = shutdown_rx.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(STATUS_LOG_INTERVAL);
                ticker.tick().await; // 첫 틱은 즉시 — 건너뜀
                loop {
                    tokio::select! {
                        _ = ticker.tick() => {
                            log_state_summary(&state);
                        }
                        _ = rx.changed() => {
                            if *rx.borrow() {
                                return;
                            }
                        }
                    }
                }
            })
        };

        info!("동기화 런타임 시작");
        let _ = tokio::join!(status_task, events_task, health_task, log_task);
        info!("동기화 런타임 종료");
    }
}

/// 현재 세션/상태 요약 한 줄 로그
fn log_state_summary(state: &DashboardState) {
    if !state.is_active() {
        debug!("세션 비활성 — 폴링 정지 상태");
        return;
    }

    match state.status() {
        Some(status) => info!(
            "상태 요약: door_open={}, timer_active={}, alarm={}, 이벤트 {}건",
            status.door_open,
            status.timer_active,
            status.alarm_triggered,
            state.events().len()
        ),
        None => info!("세션 활성, 첫 상태 수신 대기 중"),
    }
}

//! 피드 건강 감시.
//!
//! 두 피드가 공유하는 연속 실패 카운터. 어느 쪽이든 성공하면 리셋되고,
//! 임계값에 도달하면 watch 신호가 켜진다. 앱 런타임이 이 신호를 받아
//! 세션 재검증을 수행한다 — 피드는 세션 게이트를 알지 못한다.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, warn};

/// 연속 풀 실패 감시자
pub struct FeedHealth {
    /// 연속 실패 횟수 (양 피드 공유)
    failure_count: AtomicU64,
    /// 재검증을 유발하는 임계값
    threshold: u64,
    /// 건강 악화 신호
    degraded_tx: watch::Sender<bool>,
    /// 신호 수신기 (복제 가능)
    degraded_rx: watch::Receiver<bool>,
}

impl FeedHealth {
    /// 새 감시자 생성
    ///
    /// `threshold`: 이 횟수만큼 연속 실패하면 악화 신호를 켠다
    pub fn new(threshold: u64) -> Self {
        let (degraded_tx, degraded_rx) = watch::channel(false);
        Self {
            failure_count: AtomicU64::new(0),
            threshold,
            degraded_tx,
            degraded_rx,
        }
    }

    /// 풀 성공 기록 — 카운터와 악화 신호를 모두 리셋
    pub fn record_success(&self) {
        self.failure_count.store(0, Ordering::Relaxed);
        self.degraded_tx.send_if_modified(|degraded| {
            let changed = *degraded;
            *degraded = false;
            changed
        });
    }

    /// 풀 실패 기록 — 임계값 도달 시 악화 신호를 켠다
    pub fn record_failure(&self) {
        let count = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("풀 실패 기록 (연속 {}회)", count);

        if count >= self.threshold {
            let flipped = self.degraded_tx.send_if_modified(|degraded| {
                let changed = !*degraded;
                *degraded = true;
                changed
            });
            if flipped {
                warn!("연속 {}회 풀 실패 — 세션 재검증 필요", count);
            }
        }
    }

    /// 재검증 완료 후 호출 — `record_success`와 동일한 리셋
    pub fn reset(&self) {
        self.record_success();
    }

    /// 현재 연속 실패 횟수
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// 악화 신호 수신기 생성
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.degraded_rx.clone()
    }

    /// 현재 악화 여부
    pub fn is_degraded(&self) -> bool {
        *self.degraded_rx.borrow()
    }
}

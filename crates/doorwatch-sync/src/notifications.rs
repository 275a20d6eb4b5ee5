//! 알림 센터.
//!
//! `tokio::broadcast` 기반 일시적 알림 발행. 표시 계층이 구독하며,
//! 구독자가 없거나 밀려도 엔진 진행을 막지 않는다.

use async_trait::async_trait;
use doorwatch_core::models::notification::{NoticeLevel, Notification};
use doorwatch_core::ports::notifier::NotificationSink;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// 알림 센터 — `NotificationSink` 포트 구현
pub struct NotificationCenter {
    tx: broadcast::Sender<Notification>,
}

impl NotificationCenter {
    /// 새 알림 센터 생성
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// 구독자 생성
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl NotificationSink for NotificationCenter {
    async fn publish(&self, notification: Notification) {
        match notification.level {
            NoticeLevel::Error => warn!("알림: {}", notification.message),
            _ => info!("알림: {}", notification.message),
        }
        // 구독자 없음은 정상 — 전송 실패 무시
        let _ = self.tx.send(notification);
    }
}

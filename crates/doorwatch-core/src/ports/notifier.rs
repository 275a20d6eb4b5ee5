//! 알림 포트.
//!
//! 구현: `doorwatch-sync`의 `NotificationCenter` (broadcast 채널)

use async_trait::async_trait;

use crate::models::notification::Notification;

/// 일시적 알림 발행 포트
///
/// 발행은 실패하지 않는다 — 구독자가 없거나 느려도 엔진 진행을 막지 않는다.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// 알림 한 건 발행
    async fn publish(&self, notification: Notification);
}

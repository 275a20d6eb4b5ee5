//! 명령 디스패처.
//!
//! 사용자 명령을 장치로 전송한다. 명령은 피드 주기를 멈추지 않으며,
//! 성공 결과는 강제 풀로만 로컬 상태에 반영된다 (응답 본문을 믿고
//! 상태를 고치지 않는다).

use doorwatch_core::models::command::CommandRequest;
use doorwatch_core::models::notification::Notification;
use doorwatch_core::ports::device_api::DeviceApi;
use doorwatch_core::ports::notifier::NotificationSink;
use std::sync::Arc;
use tracing::{info, warn};

use crate::feeds::{EventFeed, StatusFeed};

/// 명령 디스패처
pub struct CommandDispatcher {
    api: Arc<dyn DeviceApi>,
    sink: Arc<dyn NotificationSink>,
    status_feed: Arc<StatusFeed>,
    event_feed: Arc<EventFeed>,
}

impl CommandDispatcher {
    /// 새 디스패처 생성
    pub fn new(
        api: Arc<dyn DeviceApi>,
        sink: Arc<dyn NotificationSink>,
        status_feed: Arc<StatusFeed>,
        event_feed: Arc<EventFeed>,
    ) -> Self {
        Self {
            api,
            sink,
            status_feed,
            event_feed,
        }
    }

    /// 명령 한 건 전송
    pub async fn dispatch(&self, request: CommandRequest) {
        match request {
            CommandRequest::Reset => self.reset().await,
            CommandRequest::UpdateTimerDuration(secs) => self.update_timer(secs).await,
        }
    }

    async fn reset(&self) {
        match self.api.reset().await {
            Ok(()) => {
                info!("리셋 명령 성공");
                self.sink
                    .publish(Notification::success("경보 리셋 완료"))
                    .await;
                self.refresh_now().await;
            }
            Err(e) => {
                warn!("리셋 명령 실패: {e}");
                self.sink
                    .publish(Notification::error(format!("경보 리셋 실패: {e}")))
                    .await;
            }
        }
    }

    async fn update_timer(&self, secs: u32) {
        // 범위 밖 값은 네트워크 호출 없이 로컬에서 거부
        if let Err(e) = CommandRequest::validate_duration(secs) {
            warn!("타이머 길이 거부: {e}");
            self.sink
                .publish(Notification::error(format!("{e}")))
                .await;
            return;
        }

        match self.api.update_timer(secs).await {
            Ok(()) => {
                info!("타이머 길이 변경 성공: {secs}초");
                self.sink
                    .publish(Notification::success(format!(
                        "타이머 길이 {secs}초로 변경됨"
                    )))
                    .await;
                self.refresh_now().await;
            }
            Err(e) => {
                warn!("타이머 길이 변경 실패: {e}");
                self.sink
                    .publish(Notification::error(format!("타이머 길이 변경 실패: {e}")))
                    .await;
            }
        }
    }

    /// 명령 성공 직후 두 피드 강제 풀
    async fn refresh_now(&self) {
        tokio::join!(self.status_feed.pull_once(), self.event_feed.pull_once());
    }
}

//! 일시적 알림 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 알림 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    /// 작업 성공
    Success,
    /// 작업 실패
    Error,
    /// 상태 변화 안내
    Info,
}

/// 엔진이 발행하는 일시적 알림
///
/// 표시 계층이 구독해 소비한다. 엔진의 다른 컴포넌트는 알림을 읽지 않는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// 알림 수준
    pub level: NoticeLevel,
    /// 알림 메시지
    pub message: String,
    /// 발행 시각
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// 성공 알림 생성
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    /// 실패 알림 생성
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    /// 안내 알림 생성
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

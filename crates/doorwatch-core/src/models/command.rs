//! 사용자 명령 모델.
//!
//! 명령은 일시적이다 — 발행 즉시 전송되고, 결과는 알림과 강제 풀로만 반영된다.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// 타이머 길이 허용 하한 (초)
pub const MIN_TIMER_DURATION_SECS: u32 = 1;

/// 타이머 길이 허용 상한 (초) — 24시간
pub const MAX_TIMER_DURATION_SECS: u32 = 86_400;

/// 장치로 보내는 사용자 명령
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandRequest {
    /// 경보/타이머 리셋
    Reset,
    /// 경보 타이머 길이 변경 (초)
    UpdateTimerDuration(u32),
}

impl CommandRequest {
    /// 타이머 길이 로컬 검증. 범위 밖이면 네트워크 호출 없이 거부된다.
    pub fn validate_duration(secs: u32) -> Result<(), CoreError> {
        if !(MIN_TIMER_DURATION_SECS..=MAX_TIMER_DURATION_SECS).contains(&secs) {
            return Err(CoreError::Validation {
                field: "duration".to_string(),
                message: format!(
                    "타이머 길이는 {MIN_TIMER_DURATION_SECS}~{MAX_TIMER_DURATION_SECS}초 범위여야 합니다 (입력: {secs})"
                ),
            });
        }
        Ok(())
    }
}

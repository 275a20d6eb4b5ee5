//! 이벤트 로그 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 서버 이벤트 로그 한 건
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRecord {
    /// 이벤트 발생 시각
    pub observed_at: DateTime<Utc>,
    /// 이벤트 유형 (예: "door_opened", "alarm_triggered")
    pub event_type: String,
    /// 사람이 읽는 설명
    pub description: String,
    /// 이벤트를 유발한 행위자 (사용자명 또는 시스템 식별자)
    pub actor: String,
    /// 심각도
    pub severity: Severity,
}

impl EventRecord {
    /// 행위자가 없는 서버 이벤트에 부여하는 시스템 식별자
    pub const SYSTEM_ACTOR: &'static str = "system";
}

/// 이벤트 심각도
///
/// 와이어 표현은 대문자 (`INFO` / `WARNING` / `CRITICAL`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// 정보성
    Info,
    /// 경고
    Warning,
    /// 치명적 (경보 발동 등)
    Critical,
}

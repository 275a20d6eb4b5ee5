//! 장치 상태 스냅샷 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 문 컨트롤러의 최신 상태 스냅샷
///
/// 항상 최대 한 개만 유지되며, 성공한 상태 풀마다 통째로 교체된다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceStatus {
    /// 문 열림 여부
    pub door_open: bool,
    /// 경보 타이머 동작 여부
    pub timer_active: bool,
    /// 경보 발동 여부
    pub alarm_triggered: bool,
    /// 타이머 잔여 시간 (초) — 타이머 비활성이면 None
    pub remaining_secs: Option<f64>,
    /// 설정된 타이머 길이 (초)
    pub timer_duration_secs: u32,
    /// 장치 GPIO 가용 여부 (false면 시뮬레이션 모드)
    pub gpio_available: bool,
    /// 서버가 스냅샷을 생성한 시각
    pub observed_at: DateTime<Utc>,
}

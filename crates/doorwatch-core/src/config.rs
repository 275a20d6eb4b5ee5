//! 애플리케이션 설정 구조체.
//!
//! 서버 URL, 폴링 주기, 세션 건강 임계값 등 런타임 설정을 정의한다.
//! 파일 로드/저장은 [`crate::config_manager`]가 담당하고, CLI 플래그가
//! 파일 값을 덮어쓴다.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 서버 연결 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 피드 폴링 주기 설정
    #[serde(default)]
    pub feeds: FeedsConfig,
    /// 세션 건강(연속 실패) 설정
    #[serde(default)]
    pub health: HealthConfig,
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self::default()
    }
}

/// 서버 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 문 컨트롤러 베이스 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 요청당 타임아웃 (초) — 응답 없는 호출이 다음 틱을 막지 않도록 제한
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// 요청 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// 피드 폴링 주기 설정
///
/// 두 피드는 독립 주기를 가지며 서로의 틱에 영향을 주지 않는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedsConfig {
    /// 상태 피드 폴링 주기 (밀리초)
    #[serde(default = "default_status_interval_ms")]
    pub status_interval_ms: u64,
    /// 이벤트 피드 폴링 주기 (밀리초)
    #[serde(default = "default_events_interval_ms")]
    pub events_interval_ms: u64,
}

impl FeedsConfig {
    /// 상태 피드 주기를 Duration으로 반환
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }

    /// 이벤트 피드 주기를 Duration으로 반환
    pub fn events_interval(&self) -> Duration {
        Duration::from_millis(self.events_interval_ms)
    }
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            status_interval_ms: default_status_interval_ms(),
            events_interval_ms: default_events_interval_ms(),
        }
    }
}

/// 세션 건강 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// 세션 재검증을 유발하는 연속 풀 실패 횟수
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    8
}

fn default_status_interval_ms() -> u64 {
    2_000
}

fn default_events_interval_ms() -> u64 {
    5_000
}

fn default_failure_threshold() -> u64 {
    5
}

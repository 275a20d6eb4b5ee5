//! 장치 API 포트.
//!
//! 구현: `doorwatch-network` crate (reqwest, 쿠키 세션)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::event::EventRecord;
use crate::models::status::DeviceStatus;

/// 원격 문 컨트롤러 HTTP API
///
/// 어댑터는 호출 한 건을 독립적으로 수행한다 — 내부 재시도 없음.
/// 실패한 풀은 다음 틱에서 자연히 다시 시도된다.
#[async_trait]
pub trait DeviceApi: Send + Sync {
    /// 현재 장치 상태 조회
    ///
    /// 세션 쿠키가 유효하지 않으면 인증 에러를 반환하므로
    /// 시작 시 세션 프로브로도 사용된다.
    async fn fetch_status(&self) -> Result<DeviceStatus, CoreError>;

    /// 이벤트 로그 전체 조회 (성공 시 로컬 목록을 통째로 교체)
    async fn fetch_events(&self) -> Result<Vec<EventRecord>, CoreError>;

    /// 자격증명으로 로그인. 성공하면 세션 쿠키가 쿠키 저장소에 설정된다.
    async fn login(&self, username: &str, password: &str) -> Result<(), CoreError>;

    /// 세션 종료 통지 (베스트 에포트)
    async fn logout(&self) -> Result<(), CoreError>;

    /// 경보/타이머 리셋 명령
    async fn reset(&self) -> Result<(), CoreError>;

    /// 경보 타이머 길이 변경 명령 (초)
    async fn update_timer(&self, duration_secs: u32) -> Result<(), CoreError>;

    /// 이벤트 리포트 원본 바이트 다운로드 (내용 해석 없음)
    async fn download_report(&self) -> Result<Vec<u8>, CoreError>;
}

//! DOORWATCH 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 실패를 `CoreError`로 매핑해 반환한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 설정, 유효성 검증, 네트워크/서버 응답 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 — {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 인증 실패 (자격증명 오류, 세션 거부)
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 서버가 실패 상태 코드를 반환
    #[error("서버 에러 ({status}): {message}")]
    Server {
        /// HTTP 상태 코드
        status: u16,
        /// 서버 응답 본문 (또는 상태 설명)
        message: String,
    },

    /// 응답 본문이 기대한 형태가 아님 (파싱 실패, success=false)
    #[error("프로토콜 에러: {0}")]
    Protocol(String),
}

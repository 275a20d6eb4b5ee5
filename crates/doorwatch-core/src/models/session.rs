//! 세션 모델.
//!
//! 대시보드 동기화 전체를 게이트하는 단일 세션 상태.

use serde::{Deserialize, Serialize};

/// 클라이언트 세션 상태
///
/// `active`가 false인 동안 피드는 요청을 한 건도 보내지 않는다.
/// `identity`는 비활성 상태에서 항상 빈 문자열이며, 쿠키 프로브로
/// 활성화된 경우에도 서버가 사용자명을 알려주지 않으므로 비어 있을 수 있다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// 세션 활성 여부
    pub active: bool,
    /// 로그인한 사용자명 (비활성이면 빈 문자열)
    pub identity: String,
}

/// 로그인 실패의 인라인 에러 상태
///
/// 일시적 알림과 달리, 다음 로그인 시도 또는 성공 전까지 유지된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginError {
    /// 서버가 자격증명을 거부 (어느 필드가 틀렸는지는 구분하지 않음)
    InvalidCredentials,
    /// 서버에 도달하지 못함 (연결 실패, 타임아웃)
    Unreachable,
}

impl LoginError {
    /// 대시보드 표시용 메시지
    pub fn message(&self) -> &'static str {
        match self {
            LoginError::InvalidCredentials => "사용자명 또는 비밀번호가 올바르지 않습니다",
            LoginError::Unreachable => "서버에 연결할 수 없습니다",
        }
    }
}

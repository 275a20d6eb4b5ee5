//! # doorwatch-sync
//!
//! 세션 게이트형 폴링 동기화 엔진.
//!
//! 모든 동기화는 단일 세션 상태에 의해 게이트된다: 세션이 활성인 동안만
//! 두 피드(상태/이벤트)가 독립 주기로 서버를 폴링하고, 비활성화되는 즉시
//! 요청이 멈추고 파생 상태가 정리된다.
//!
//! ## 컴포넌트
//!
//! - [`session_gate::SessionGate`] — 세션 수립/해제, 유일한 세션 쓰기 주체
//! - [`feeds::StatusFeed`] / [`feeds::EventFeed`] — 주기 폴링 루프
//! - [`dispatcher::CommandDispatcher`] — 사용자 명령 전송
//! - [`feed_health::FeedHealth`] — 연속 실패 감시, 세션 재검증 신호
//! - [`notifications::NotificationCenter`] — broadcast 알림 발행

pub mod dispatcher;
pub mod feed_health;
pub mod feeds;
pub mod notifications;
pub mod session_gate;

pub use dispatcher::CommandDispatcher;
pub use feed_health::FeedHealth;
pub use feeds::{EventFeed, StatusFeed};
pub use notifications::NotificationCenter;
pub use session_gate::SessionGate;

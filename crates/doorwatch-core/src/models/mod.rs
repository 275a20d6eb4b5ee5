//! 도메인 데이터 모델.

pub mod command;
pub mod event;
pub mod notification;
pub mod session;
pub mod status;

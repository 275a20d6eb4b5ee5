//! Hexagonal Architecture 포트 인터페이스.

pub mod device_api;
pub mod notifier;

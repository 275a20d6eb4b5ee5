//! # doorwatch-network
//!
//! `DeviceApi` 포트의 HTTP 구현. reqwest 쿠키 저장소로 서버 세션을
//! 자동 유지하며, 모든 실패를 `CoreError`로 매핑한다.

pub mod http_client;

pub use http_client::HttpDeviceApi;

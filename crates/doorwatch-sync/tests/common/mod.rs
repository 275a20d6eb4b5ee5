//! 통합 테스트 공용 하네스.
//!
//! 프로그래머블 `DeviceApi` 목과 엔진 조립 헬퍼.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use doorwatch_core::error::CoreError;
use doorwatch_core::models::event::{EventRecord, Severity};
use doorwatch_core::models::status::DeviceStatus;
use doorwatch_core::ports::device_api::DeviceApi;
use doorwatch_core::state::DashboardState;
use doorwatch_sync::{
    CommandDispatcher, EventFeed, FeedHealth, NotificationCenter, SessionGate, StatusFeed,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// 목이 돌려줄 결과 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    NetworkErr,
    AuthErr,
    ProtocolErr,
    ServerErr,
}

fn outcome_err(outcome: Outcome) -> CoreError {
    match outcome {
        Outcome::Ok => unreachable!("성공 결과는 에러로 변환하지 않는다"),
        Outcome::NetworkErr => CoreError::Network("연결 거부".to_string()),
        Outcome::AuthErr => CoreError::Auth("세션 거부 (401)".to_string()),
        Outcome::ProtocolErr => CoreError::Protocol("success=false".to_string()),
        Outcome::ServerErr => CoreError::Server {
            status: 500,
            message: "internal".to_string(),
        },
    }
}

/// 프로그래머블 장치 API 목
///
/// 호출 횟수를 세고, 엔드포인트별로 다음 결과를 지정할 수 있다.
pub struct MockDeviceApi {
    pub status_calls: AtomicUsize,
    pub events_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub reset_calls: AtomicUsize,
    pub timer_calls: AtomicUsize,
    pub last_timer_duration: Mutex<Option<u32>>,

    status_outcome: Mutex<Outcome>,
    status_value: Mutex<DeviceStatus>,
    events_outcome: Mutex<Outcome>,
    events_value: Mutex<Vec<EventRecord>>,
    login_outcome: Mutex<Outcome>,
    logout_outcome: Mutex<Outcome>,
    reset_outcome: Mutex<Outcome>,
    timer_outcome: Mutex<Outcome>,

    /// 지정되면 상태 조회가 notify까지 대기한다 (지연 응답 시뮬레이션)
    status_gate: Mutex<Option<Arc<Notify>>>,
}

impl Default for MockDeviceApi {
    fn default() -> Self {
        Self {
            status_calls: AtomicUsize::new(0),
            events_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            reset_calls: AtomicUsize::new(0),
            timer_calls: AtomicUsize::new(0),
            last_timer_duration: Mutex::new(None),
            status_outcome: Mutex::new(Outcome::Ok),
            status_value: Mutex::new(sample_status(false)),
            events_outcome: Mutex::new(Outcome::Ok),
            events_value: Mutex::new(Vec::new()),
            login_outcome: Mutex::new(Outcome::Ok),
            logout_outcome: Mutex::new(Outcome::Ok),
            reset_outcome: Mutex::new(Outcome::Ok),
            timer_outcome: Mutex::new(Outcome::Ok),
            status_gate: Mutex::new(None),
        }
    }
}

impl MockDeviceApi {
    pub fn set_status(&self, status: DeviceStatus) {
        *self.status_value.lock() = status;
        *self.status_outcome.lock() = Outcome::Ok;
    }

    pub fn fail_status(&self, outcome: Outcome) {
        *self.status_outcome.lock() = outcome;
    }

    pub fn set_events(&self, events: Vec<EventRecord>) {
        *self.events_value.lock() = events;
        *self.events_outcome.lock() = Outcome::Ok;
    }

    pub fn fail_events(&self, outcome: Outcome) {
        *self.events_outcome.lock() = outcome;
    }

    pub fn fail_login(&self, outcome: Outcome) {
        *self.login_outcome.lock() = outcome;
    }

    pub fn fail_logout(&self, outcome: Outcome) {
        *self.logout_outcome.lock() = outcome;
    }

    pub fn fail_reset(&self, outcome: Outcome) {
        *self.reset_outcome.lock() = outcome;
    }

    pub fn fail_timer(&self, outcome: Outcome) {
        *self.timer_outcome.lock() = outcome;
    }

    /// 상태 조회를 notify까지 지연시킨다
    pub fn delay_status(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.status_gate.lock() = Some(notify.clone());
        notify
    }

    pub fn total_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
            + self.events_calls.load(Ordering::SeqCst)
            + self.login_calls.load(Ordering::SeqCst)
            + self.logout_calls.load(Ordering::SeqCst)
            + self.reset_calls.load(Ordering::SeqCst)
            + self.timer_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeviceApi for MockDeviceApi {
    async fn fetch_status(&self) -> Result<DeviceStatus, CoreError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.status_gate.lock().clone();
        if let Some(notify) = gate {
            notify.notified().await;
        }

        let outcome = *self.status_outcome.lock();
        match outcome {
            Outcome::Ok => Ok(self.status_value.lock().clone()),
            other => Err(outcome_err(other)),
        }
    }

    async fn fetch_events(&self) -> Result<Vec<EventRecord>, CoreError> {
        self.events_calls.fetch_add(1, Ordering::SeqCst);
        let outcome = *self.events_outcome.lock();
        match outcome {
            Outcome::Ok => Ok(self.events_value.lock().clone()),
            other => Err(outcome_err(other)),
        }
    }

    async fn login(&self, _username: &str, _password: &str) -> Result<(), CoreError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        let outcome = *self.login_outcome.lock();
        match outcome {
            Outcome::Ok => Ok(()),
            other => Err(outcome_err(other)),
        }
    }

    async fn logout(&self) -> Result<(), CoreError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        let outcome = *self.logout_outcome.lock();
        match outcome {
            Outcome::Ok => Ok(()),
            other => Err(outcome_err(other)),
        }
    }

    async fn reset(&self) -> Result<(), CoreError> {
        self.reset_calls.fetch_add(1, Ordering::SeqCst);
        let outcome = *self.reset_outcome.lock();
        match outcome {
            Outcome::Ok => Ok(()),
            other => Err(outcome_err(other)),
        }
    }

    async fn update_timer(&self, duration_secs: u32) -> Result<(), CoreError> {
        self.timer_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_timer_duration.lock() = Some(duration_secs);
        let outcome = *self.timer_outcome.lock();
        match outcome {
            Outcome::Ok => Ok(()),
            other => Err(outcome_err(other)),
        }
    }

    async fn download_report(&self) -> Result<Vec<u8>, CoreError> {
        Ok(b"report".to_vec())
    }
}

/// 조립된 동기화 엔진
pub struct Engine {
    pub api: Arc<MockDeviceApi>,
    pub state: Arc<DashboardState>,
    pub health: Arc<FeedHealth>,
    pub status_feed: Arc<StatusFeed>,
    pub event_feed: Arc<EventFeed>,
    pub gate: SessionGate,
    pub dispatcher: CommandDispatcher,
    pub center: Arc<NotificationCenter>,
}

/// 기본 임계값(5)으로 엔진 조립
pub fn engine() -> Engine {
    engine_with_threshold(5)
}

pub fn engine_with_threshold(threshold: u64) -> Engine {
    let api = Arc::new(MockDeviceApi::default());
    let state = Arc::new(DashboardState::new());
    let health = Arc::new(FeedHealth::new(threshold));
    let center = Arc::new(NotificationCenter::new(64));

    let status_feed = Arc::new(StatusFeed::new(
        api.clone(),
        state.clone(),
        health.clone(),
        Duration::from_millis(50),
    ));
    let event_feed = Arc::new(EventFeed::new(
        api.clone(),
        state.clone(),
        health.clone(),
        Duration::from_millis(100),
    ));

    let gate = SessionGate::new(
        api.clone(),
        state.clone(),
        center.clone(),
        status_feed.clone(),
        event_feed.clone(),
        health.clone(),
    );
    let dispatcher = CommandDispatcher::new(
        api.clone(),
        center.clone(),
        status_feed.clone(),
        event_feed.clone(),
    );

    Engine {
        api,
        state,
        health,
        status_feed,
        event_feed,
        gate,
        dispatcher,
        center,
    }
}

/// 상태 스냅샷 샘플
pub fn sample_status(door_open: bool) -> DeviceStatus {
    DeviceStatus {
        door_open,
        timer_active: door_open,
        alarm_triggered: false,
        remaining_secs: if door_open { Some(25.0) } else { None },
        timer_duration_secs: 30,
        gpio_available: true,
        observed_at: Utc::now(),
    }
}

/// 이벤트 샘플
pub fn sample_event(description: &str) -> EventRecord {
    EventRecord {
        observed_at: Utc::now(),
        event_type: "door_opened".to_string(),
        description: description.to_string(),
        actor: "admin".to_string(),
        severity: Severity::Info,
    }
}

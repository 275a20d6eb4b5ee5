//! 문 컨트롤러 HTTP 클라이언트.
//!
//! `DeviceApi` 포트 구현. 쿠키 저장소를 켜서 로그인으로 받은 세션 쿠키가
//! 이후 모든 호출에 자동으로 실린다. 어댑터 내부 재시도는 없다 —
//! 실패한 풀은 다음 틱이 자연히 다시 시도한다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use doorwatch_core::error::CoreError;
use doorwatch_core::models::event::{EventRecord, Severity};
use doorwatch_core::models::status::DeviceStatus;
use doorwatch_core::ports::device_api::DeviceApi;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// `/api/status` 응답 본문
#[derive(Debug, Deserialize)]
struct StatusBody {
    success: bool,
    door_open: bool,
    timer_active: bool,
    alarm_triggered: bool,
    remaining_time: Option<f64>,
    timer_duration: u32,
    gpio_available: bool,
    timestamp: DateTime<Utc>,
}

impl From<StatusBody> for DeviceStatus {
    fn from(body: StatusBody) -> Self {
        DeviceStatus {
            door_open: body.door_open,
            timer_active: body.timer_active,
            alarm_triggered: body.alarm_triggered,
            remaining_secs: body.remaining_time,
            timer_duration_secs: body.timer_duration,
            gpio_available: body.gpio_available,
            observed_at: body.timestamp,
        }
    }
}

/// `/api/events` 응답 본문
#[derive(Debug, Deserialize)]
struct EventsBody {
    success: bool,
    #[serde(default)]
    events: Vec<EventWire>,
}

/// 이벤트 한 건의 와이어 표현
#[derive(Debug, Deserialize)]
struct EventWire {
    timestamp: DateTime<Utc>,
    event_type: String,
    description: String,
    username: Option<String>,
    severity: Severity,
}

impl From<EventWire> for EventRecord {
    fn from(wire: EventWire) -> Self {
        EventRecord {
            observed_at: wire.timestamp,
            event_type: wire.event_type,
            description: wire.description,
            // 행위자 없는 서버 이벤트는 시스템 식별자로 귀속
            actor: wire
                .username
                .unwrap_or_else(|| EventRecord::SYSTEM_ACTOR.to_string()),
            severity: wire.severity,
        }
    }
}

/// 문 컨트롤러 REST 클라이언트 — `DeviceApi` 포트 구현
pub struct HttpDeviceApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDeviceApi {
    /// 새 장치 API 클라이언트 생성
    ///
    /// 요청당 타임아웃을 강제해, 응답 없는 호출이 피드의 다음 틱을
    /// 막지 못하게 한다.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 응답 상태 코드 확인 및 에러 매핑
    async fn check_response(&self, resp: reqwest::Response) -> Result<reqwest::Response, CoreError> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let status_code = status.as_u16();
        let text = resp.text().await.unwrap_or_else(|e| {
            warn!("응답 본문 읽기 실패: {e}");
            String::new()
        });

        match status_code {
            401 | 403 => Err(CoreError::Auth(format!("세션 거부 ({status_code}): {text}"))),
            _ => Err(CoreError::Server {
                status: status_code,
                message: text,
            }),
        }
    }
}

#[async_trait]
impl DeviceApi for HttpDeviceApi {
    async fn fetch_status(&self) -> Result<DeviceStatus, CoreError> {
        let resp = self
            .client
            .get(self.url("/api/status"))
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("상태 조회 요청 실패: {e}")))?;

        let resp = self.check_response(resp).await?;
        let body: StatusBody = resp
            .json()
            .await
            .map_err(|e| CoreError::Protocol(format!("상태 응답 파싱 실패: {e}")))?;

        if !body.success {
            return Err(CoreError::Protocol("상태 응답 success=false".to_string()));
        }

        debug!(
            "상태 수신: door_open={}, alarm={}",
            body.door_open, body.alarm_triggered
        );
        Ok(body.into())
    }

    async fn fetch_events(&self) -> Result<Vec<EventRecord>, CoreError> {
        let resp = self
            .client
            .get(self.url("/api/events"))
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("이벤트 조회 요청 실패: {e}")))?;

        let resp = self.check_response(resp).await?;
        let body: EventsBody = resp
            .json()
            .await
            .map_err(|e| CoreError::Protocol(format!("이벤트 응답 파싱 실패: {e}")))?;

        if !body.success {
            return Err(CoreError::Protocol("이벤트 응답 success=false".to_string()));
        }

        debug!("이벤트 {}건 수신", body.events.len());
        Ok(body.events.into_iter().map(EventRecord::from).collect())
    }

    async fn login(&self, username: &str, password: &str) -> Result<(), CoreError> {
        let form = [("username", username), ("password", password)];
        let resp = self
            .client
            .post(self.url("/login"))
            .form(&form)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("로그인 요청 실패: {e}")))?;

        self.check_response(resp).await?;
        debug!("로그인 성공: {username}");
        Ok(())
    }

    async fn logout(&self) -> Result<(), CoreError> {
        let resp = self
            .client
            .post(self.url("/logout"))
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("로그아웃 요청 실패: {e}")))?;

        self.check_response(resp).await?;
        debug!("로그아웃 통지 완료");
        Ok(())
    }

    async fn reset(&self) -> Result<(), CoreError> {
        // 본문 없는 JSON POST — 원 서버가 content-type만 확인한다
        let resp = self
            .client
            .post(self.url("/api/reset"))
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("리셋 요청 실패: {e}")))?;

        self.check_response(resp).await?;
        debug!("리셋 명령 전송 완료");
        Ok(())
    }

    async fn update_timer(&self, duration_secs: u32) -> Result<(), CoreError> {
        let body = serde_json::json!({ "duration": duration_secs });
        let resp = self
            .client
            .post(self.url("/api/update_timer"))
            .json(&body)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("타이머 변경 요청 실패: {e}")))?;

        self.check_response(resp).await?;
        debug!("타이머 길이 변경 전송 완료: {duration_secs}초");
        Ok(())
    }

    async fn download_report(&self) -> Result<Vec<u8>, CoreError> {
        let resp = self
            .client
            .get(self.url("/api/download_report"))
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("리포트 다운로드 요청 실패: {e}")))?;

        let resp = self.check_response(resp).await?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| CoreError::Network(format!("리포트 본문 수신 실패: {e}")))?;

        debug!("리포트 다운로드 완료: {} 바이트", bytes.len());
        Ok(bytes.to_vec())
    }
}

//! # doorwatch-app
//!
//! DOORWATCH 클라이언트 바이너리 진입점.
//! DI 컨테이너 역할, 라이프사이클 관리, 런타임 오케스트레이션.

mod runtime;

use anyhow::{bail, Context, Result};
use clap::Parser;
use doorwatch_core::config::AppConfig;
use doorwatch_core::config_manager::ConfigManager;
use doorwatch_core::models::command::CommandRequest;
use doorwatch_core::ports::device_api::DeviceApi;
use doorwatch_core::state::DashboardState;
use doorwatch_network::HttpDeviceApi;
use doorwatch_sync::{
    CommandDispatcher, EventFeed, FeedHealth, NotificationCenter, SessionGate, StatusFeed,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::runtime::SyncRuntime;

/// DOORWATCH 클라이언트
///
/// 원격 문 컨트롤러 폴링 동기화 데몬
#[derive(Parser, Debug)]
#[command(name = "doorwatch")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 서버 URL 지정 (기본: http://localhost:5000)
    #[arg(long, short = 's')]
    server: Option<String>,

    /// 로그인 사용자명 (없으면 DOORWATCH_USERNAME 환경 변수)
    #[arg(long, short = 'u')]
    username: Option<String>,

    /// 로그인 비밀번호 (없으면 DOORWATCH_PASSWORD 환경 변수)
    #[arg(long, short = 'p')]
    password: Option<String>,

    /// 상태 피드 폴링 주기 (밀리초)
    #[arg(long)]
    status_interval_ms: Option<u64>,

    /// 이벤트 피드 폴링 주기 (밀리초)
    #[arg(long)]
    events_interval_ms: Option<u64>,

    /// 요청당 타임아웃 (초)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long)]
    config: Option<PathBuf>,

    /// 경보 리셋 한 번 보내고 종료
    #[arg(long)]
    reset: bool,

    /// 타이머 길이 변경 한 번 보내고 종료 (초)
    #[arg(long)]
    timer_duration: Option<u32>,

    /// 이벤트 리포트를 내려받아 지정 경로에 저장하고 종료
    #[arg(long)]
    download_report: Option<PathBuf>,
}

impl Args {
    /// CLI 플래그 또는 환경 변수에서 자격증명 결정
    fn credentials(&self) -> Option<(String, String)> {
        let username = self
            .username
            .clone()
            .or_else(|| std::env::var("DOORWATCH_USERNAME").ok())?;
        let password = self
            .password
            .clone()
            .or_else(|| std::env::var("DOORWATCH_PASSWORD").ok())?;
        Some((username, password))
    }

    /// 한 번 실행하고 종료하는 모드인지
    fn is_one_shot(&self) -> bool {
        self.reset || self.timer_duration.is_some() || self.download_report.is_some()
    }
}

/// 파일 설정 위에 CLI 플래그 덮어쓰기
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(server) = &args.server {
        config.server.base_url = server.clone();
    }
    if let Some(timeout) = args.timeout_secs {
        config.server.timeout_secs = timeout;
    }
    if let Some(interval) = args.status_interval_ms {
        config.feeds.status_interval_ms = interval;
    }
    if let Some(interval) = args.events_interval_ms {
        config.feeds.events_interval_ms = interval;
    }
}

/// SIGINT/SIGTERM 대기
async fn wait_for_termination() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).ok();
        tokio::select! {
            _ = tokio::signal::ctrl_c() => info!("SIGINT 수신"),
            _ = async {
                match sigterm.as_mut() {
                    Some(s) => { s.recv().await; }
                    None => std::future::pending::<()>().await,
                }
            } => info!("SIGTERM 수신"),
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("종료 신호 수신");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level)
        .or_else(|_| EnvFilter::try_new("info"))
        .context("로그 필터 초기화 실패")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_manager = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone())?,
        None => ConfigManager::new()?,
    };
    let mut config = config_manager.get();
    apply_overrides(&mut config, &args);

    info!(
        "DOORWATCH 시작: server={}, status={}ms, events={}ms",
        config.server.base_url, config.feeds.status_interval_ms, config.feeds.events_interval_ms
    );

    // 조립
    let api: Arc<HttpDeviceApi> = Arc::new(HttpDeviceApi::new(
        &config.server.base_url,
        config.server.timeout(),
    )?);
    let state = Arc::new(DashboardState::new());
    let health = Arc::new(FeedHealth::new(config.health.failure_threshold));
    let center = Arc::new(NotificationCenter::default());

    let status_feed = Arc::new(StatusFeed::new(
        api.clone(),
        state.clone(),
        health.clone(),
        config.feeds.status_interval(),
    ));
    let event_feed = Arc::new(EventFeed::new(
        api.clone(),
        state.clone(),
        health.clone(),
        config.feeds.events_interval(),
    ));
    let gate = Arc::new(SessionGate::new(
        api.clone(),
        state.clone(),
        center.clone(),
        status_feed.clone(),
        event_feed.clone(),
        health.clone(),
    ));
    let dispatcher = CommandDispatcher::new(
        api.clone(),
        center.clone(),
        status_feed.clone(),
        event_feed.clone(),
    );

    // 세션 수립: 프로브 한 번, 자격증명이 있으면 로그인
    gate.probe().await;
    if let Some((username, password)) = args.credentials() {
        if !state.is_active() || state.session().identity != username {
            gate.login(&username, &password).await;
        }
    }

    if args.is_one_shot() {
        return run_one_shot(&args, &state, &dispatcher, api.as_ref()).await;
    }

    if !state.is_active() {
        warn!("세션 없이 시작 — 로그인 전까지 폴링하지 않음");
    }

    // 런타임 실행
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runtime = SyncRuntime::new(
        state.clone(),
        status_feed,
        event_feed,
        gate.clone(),
        health,
    );
    let runner = tokio::spawn(runtime.run(shutdown_rx));

    wait_for_termination().await;
    info!("정리 시작");
    let _ = shutdown_tx.send(true);
    runner.await.context("런타임 태스크 종료 실패")?;

    if state.is_active() {
        gate.logout().await;
    }

    info!("DOORWATCH 종료");
    Ok(())
}

/// 단발 명령 모드: 전송하고 결과를 보고한 뒤 종료
async fn run_one_shot(
    args: &Args,
    state: &DashboardState,
    dispatcher: &CommandDispatcher,
    api: &dyn DeviceApi,
) -> Result<()> {
    if !state.is_active() {
        match state.login_error() {
            Some(e) => bail!("로그인 실패: {}", e.message()),
            None => bail!("활성 세션이 없습니다 — --username/--password 또는 환경 변수를 지정하세요"),
        }
    }

    if args.reset {
        dispatcher.dispatch(CommandRequest::Reset).await;
    }

    if let Some(secs) = args.timer_duration {
        dispatcher
            .dispatch(CommandRequest::UpdateTimerDuration(secs))
            .await;
    }

    if let Some(path) = &args.download_report {
        let bytes = api.download_report().await?;
        std::fs::write(path, &bytes)
            .with_context(|| format!("리포트 저장 실패: {}", path.display()))?;
        info!("리포트 저장 완료: {} ({} 바이트)", path.display(), bytes.len());
    }

    Ok(())
}

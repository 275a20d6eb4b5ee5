//! 명령 디스패처 통합 테스트.

mod common;

use common::{engine, Outcome};
use doorwatch_core::models::command::CommandRequest;
use doorwatch_core::models::notification::NoticeLevel;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn reset_success_notifies_and_refreshes_both_feeds() {
    let eng = engine();
    eng.gate.login("admin", "secret").await;
    let status_before = eng.api.status_calls.load(Ordering::SeqCst);
    let events_before = eng.api.events_calls.load(Ordering::SeqCst);
    let mut notices = eng.center.subscribe();

    eng.dispatcher.dispatch(CommandRequest::Reset).await;

    assert_eq!(eng.api.reset_calls.load(Ordering::SeqCst), 1);
    // 성공 직후 강제 풀 — 두 피드 각 1회
    assert_eq!(
        eng.api.status_calls.load(Ordering::SeqCst),
        status_before + 1
    );
    assert_eq!(
        eng.api.events_calls.load(Ordering::SeqCst),
        events_before + 1
    );

    let notice = notices.recv().await.unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
}

#[tokio::test]
async fn reset_failure_notifies_without_refreshing() {
    let eng = engine();
    eng.gate.login("admin", "secret").await;
    let status_before = eng.api.status_calls.load(Ordering::SeqCst);
    eng.api.fail_reset(Outcome::ServerErr);
    let mut notices = eng.center.subscribe();

    eng.dispatcher.dispatch(CommandRequest::Reset).await;

    assert_eq!(eng.api.status_calls.load(Ordering::SeqCst), status_before);
    let notice = notices.recv().await.unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
}

#[tokio::test]
async fn out_of_range_duration_is_rejected_locally() {
    let eng = engine();
    eng.gate.login("admin", "secret").await;
    let mut notices = eng.center.subscribe();

    eng.dispatcher
        .dispatch(CommandRequest::UpdateTimerDuration(0))
        .await;
    eng.dispatcher
        .dispatch(CommandRequest::UpdateTimerDuration(86_401))
        .await;

    // 네트워크 호출 전혀 없음
    assert_eq!(eng.api.timer_calls.load(Ordering::SeqCst), 0);

    let first = notices.recv().await.unwrap();
    let second = notices.recv().await.unwrap();
    assert_eq!(first.level, NoticeLevel::Error);
    assert_eq!(second.level, NoticeLevel::Error);
}

#[tokio::test]
async fn valid_duration_is_sent_and_named_in_notice() {
    let eng = engine();
    eng.gate.login("admin", "secret").await;
    let mut notices = eng.center.subscribe();

    eng.dispatcher
        .dispatch(CommandRequest::UpdateTimerDuration(60))
        .await;

    assert_eq!(eng.api.timer_calls.load(Ordering::SeqCst), 1);
    assert_eq!(*eng.api.last_timer_duration.lock(), Some(60));

    let notice = notices.recv().await.unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert!(notice.message.contains("60"));
}

#[tokio::test]
async fn failed_duration_update_leaves_local_status_untouched() {
    let eng = engine();
    eng.gate.login("admin", "secret").await;
    let before = eng.state.status();
    assert!(before.is_some());
    eng.api.fail_timer(Outcome::ServerErr);

    eng.dispatcher
        .dispatch(CommandRequest::UpdateTimerDuration(120))
        .await;

    assert_eq!(eng.state.status(), before);
}

#[tokio::test]
async fn boundary_durations_pass_validation() {
    let eng = engine();
    eng.gate.login("admin", "secret").await;

    eng.dispatcher
        .dispatch(CommandRequest::UpdateTimerDuration(1))
        .await;
    eng.dispatcher
        .dispatch(CommandRequest::UpdateTimerDuration(86_400))
        .await;

    assert_eq!(eng.api.timer_calls.load(Ordering::SeqCst), 2);
    assert_eq!(*eng.api.last_timer_duration.lock(), Some(86_400));
}

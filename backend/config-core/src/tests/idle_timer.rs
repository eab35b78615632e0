// Unit tests for the idle timer.
// All tests run on paused tokio time, so "120 seconds" costs nothing.

use crate::idle_timer::IdleTimer;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, advance};

const TIMEOUT: Duration = Duration::from_secs(120);

/// Let spawned tasks observe the current (paused) clock.
async fn settle() {
    for _ in 0..3 {
        tokio::task::yield_now().await;
    }
}

fn spawn_expiry(timer: &Arc<IdleTimer>) -> tokio::task::JoinHandle<Instant> {
    let timer = Arc::clone(timer);
    tokio::spawn(async move {
        timer.expired().await;
        Instant::now()
    })
}

/// **VALUE**: Verifies an untouched timer expires exactly one timeout after creation.
///
/// **WHY THIS MATTERS**: A browser tab that was closed right after launch must not leave
/// the server running forever.
///
/// **BUG THIS CATCHES**: Would catch an initial deadline that is never armed.
#[tokio::test(start_paused = true)]
async fn given_no_activity_when_timeout_elapses_then_timer_expires() {
    // GIVEN: A fresh timer
    let started = Instant::now();
    let timer = Arc::new(IdleTimer::new(TIMEOUT));
    let expiry = spawn_expiry(&timer);

    // WHEN: Just short of the timeout
    advance(TIMEOUT - Duration::from_secs(1)).await;
    settle().await;

    // THEN: Still running
    assert!(!expiry.is_finished(), "Timer fired early");

    // WHEN: Past the timeout
    let fired_at = expiry.await.unwrap();

    // THEN: Fired at creation + timeout
    assert!(fired_at >= started + TIMEOUT);
    assert!(fired_at < started + TIMEOUT + Duration::from_secs(1));
}

/// **VALUE**: Verifies a reset at T moves expiry to T + timeout.
///
/// **WHY THIS MATTERS**: Every API request resets the timer; a user actively editing
/// settings must never see the server disappear.
///
/// **BUG THIS CATCHES**: Would catch a reset that does not cancel the original deadline.
#[tokio::test(start_paused = true)]
async fn given_reset_at_t_when_waiting_then_expires_at_t_plus_timeout() {
    // GIVEN: A timer with an expiry watcher
    let timer = Arc::new(IdleTimer::new(TIMEOUT));
    let expiry = spawn_expiry(&timer);

    // WHEN: Resetting 100s in
    advance(Duration::from_secs(100)).await;
    let reset_at = Instant::now();
    timer.reset();
    settle().await;

    // THEN: The original deadline (t=120) passes without firing
    advance(Duration::from_secs(30)).await;
    settle().await;
    assert!(!expiry.is_finished(), "Original deadline should be superseded");

    // AND: It fires at reset + timeout
    let fired_at = expiry.await.unwrap();
    assert!(fired_at >= reset_at + TIMEOUT);
    assert!(fired_at < reset_at + TIMEOUT + Duration::from_secs(1));
}

/// **VALUE**: Verifies two resets 10 units apart expire relative to the second one.
///
/// **BUG THIS CATCHES**: Would catch keeping the earliest pending deadline instead of the latest.
#[tokio::test(start_paused = true)]
async fn given_two_resets_ten_seconds_apart_when_waiting_then_expires_after_second() {
    // GIVEN: A timer with an expiry watcher
    let timer = Arc::new(IdleTimer::new(TIMEOUT));
    let expiry = spawn_expiry(&timer);

    // WHEN: Two resets, ten seconds apart
    advance(Duration::from_secs(5)).await;
    timer.reset();
    advance(Duration::from_secs(10)).await;
    let second_reset = Instant::now();
    timer.reset();
    settle().await;

    // THEN: Not at first reset + timeout
    advance(TIMEOUT - Duration::from_secs(5)).await;
    settle().await;
    assert!(!expiry.is_finished(), "Fired relative to the first reset");

    // AND: At second reset + timeout
    let fired_at = expiry.await.unwrap();
    assert!(fired_at >= second_reset + TIMEOUT);
    assert!(fired_at < second_reset + TIMEOUT + Duration::from_secs(1));
}

/// **VALUE**: Verifies `reset()` moves the single stored deadline.
///
/// **BUG THIS CATCHES**: Would catch reset computing from the old deadline instead of now.
#[tokio::test(start_paused = true)]
async fn given_reset_when_deadline_read_then_now_plus_timeout() {
    // GIVEN: A timer
    let timer = IdleTimer::new(TIMEOUT);

    // WHEN: Resetting 42 seconds later
    advance(Duration::from_secs(42)).await;
    timer.reset();

    // THEN: Deadline is now + timeout
    assert_eq!(timer.deadline(), Instant::now() + TIMEOUT);
    assert_eq!(timer.timeout(), TIMEOUT);
}

use malikay::kernel::error::KernelError;
use malikay::kernel::time::Tick;
use malikay::kernel::timer::{
    CountdownTimer, TimerEvent, TimerOutcome, TimerState, DEFAULT_MINUTES, MAX_MINUTES, MIN_MINUTES,
};
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

async fn drain(minutes: u32) -> (Vec<u32>, usize, TimerOutcome, Duration) {
    let started = Instant::now();
    let timer = CountdownTimer::new(minutes).expect("Duration in range");
    let (mut rx, handle) = timer.spawn(CancellationToken::new());

    let mut remaining = Vec::new();
    let mut completes = 0;
    while let Some(event) = rx.recv().await {
        match event {
            TimerEvent::Tick(tick) => {
                assert_eq!(completes, 0, "No tick may follow Complete");
                remaining.push(tick.remaining_seconds);
            }
            TimerEvent::Complete => completes += 1,
        }
    }
    let outcome = handle.await.expect("Timer task panicked");
    (remaining, completes, outcome, started.elapsed())
}

#[tokio::test(start_paused = true)]
async fn test_one_minute_countdown() {
    let (remaining, completes, outcome, elapsed) = drain(1).await;

    assert_eq!(remaining.len(), 60, "Exactly 60 ticks for one minute");
    assert_eq!(remaining, (0..60).rev().collect::<Vec<u32>>(), "Strictly decrementing to zero");
    assert_eq!(remaining.iter().filter(|r| **r == 0).count(), 1, "Zero is reached once");
    assert_eq!(completes, 1, "Complete fires exactly once");
    assert_eq!(outcome, TimerOutcome::Completed);
    assert!(elapsed >= Duration::from_secs(60) && elapsed < Duration::from_secs(61));
}

#[tokio::test(start_paused = true)]
async fn test_ten_minute_countdown() {
    let (remaining, completes, outcome, _) = drain(10).await;

    assert_eq!(remaining.len(), 600);
    assert_eq!(remaining.first(), Some(&599));
    assert_eq!(remaining.last(), Some(&0));
    assert_eq!(completes, 1);
    assert_eq!(outcome, TimerOutcome::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_ticks_without_complete() {
    let timer = CountdownTimer::new(1).unwrap();
    let token = CancellationToken::new();
    let (mut rx, handle) = timer.spawn(token.clone());

    let mut ticks = 0;
    while ticks < 5 {
        match rx.recv().await {
            Some(TimerEvent::Tick(_)) => ticks += 1,
            other => panic!("Unexpected event before cancel: {:?}", other),
        }
    }

    token.cancel();

    while let Some(event) = rx.recv().await {
        match event {
            TimerEvent::Tick(_) => ticks += 1,
            TimerEvent::Complete => panic!("Cancelled countdown must not complete"),
        }
    }

    assert!(ticks < 60, "Ticks must stop after cancel, got {}", ticks);
    assert_eq!(handle.await.unwrap(), TimerOutcome::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_first_tick() {
    let token = CancellationToken::new();
    token.cancel();
    let (mut rx, handle) = CountdownTimer::new(3).unwrap().spawn(token);

    assert!(rx.recv().await.is_none(), "No events from a pre-cancelled timer");
    assert_eq!(handle.await.unwrap(), TimerOutcome::Cancelled);
}

#[test]
fn test_duration_bounds() {
    assert_eq!(MIN_MINUTES, 1);
    assert_eq!(MAX_MINUTES, 10);
    assert_eq!(DEFAULT_MINUTES, 3);

    assert!(TimerState::start(1).is_ok());
    assert!(TimerState::start(10).is_ok());
    assert_eq!(
        TimerState::start(0).unwrap_err(),
        KernelError::InvalidTimerDuration { got: 0, min: 1, max: 10 }
    );
    assert!(matches!(
        CountdownTimer::new(11),
        Err(KernelError::InvalidTimerDuration { got: 11, .. })
    ));
}

#[test]
fn test_timer_state_is_terminal_at_zero() {
    let mut state = TimerState::start(1).unwrap();
    assert_eq!(state.total_seconds, 60);
    assert_eq!(state.remaining_seconds, 60);
    assert!(state.running);

    let mut count = 0;
    while let Some(tick) = state.advance() {
        count += 1;
        assert_eq!(tick.total_seconds, 60);
    }

    assert_eq!(count, 60);
    assert!(state.is_complete());
    assert!(!state.running);
    assert!(state.advance().is_none(), "Terminal state emits nothing more");
}

#[test]
fn test_tick_clock_and_progress() {
    let tick = Tick { total_seconds: 180, remaining_seconds: 179 };
    assert_eq!(tick.clock(), "02:59");
    assert!(!tick.is_final());

    let last = Tick { total_seconds: 180, remaining_seconds: 0 };
    assert_eq!(last.clock(), "00:00");
    assert!(last.is_final());
    assert!((last.progress() - 1.0).abs() < f32::EPSILON);

    let half = Tick { total_seconds: 600, remaining_seconds: 300 };
    assert!((half.progress() - 0.5).abs() < f32::EPSILON);
}

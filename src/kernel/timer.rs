use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::error::KernelError;
use super::time::{Tick, TICK_MS};

pub const MIN_MINUTES: u32 = 1;
pub const MAX_MINUTES: u32 = 10;
pub const DEFAULT_MINUTES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub total_seconds: u32,
    pub remaining_seconds: u32,
    pub running: bool,
}

impl TimerState {
    pub fn start(minutes: u32) -> Result<Self, KernelError> {
        if !(MIN_MINUTES..=MAX_MINUTES).contains(&minutes) {
            return Err(KernelError::InvalidTimerDuration {
                got: minutes,
                min: MIN_MINUTES,
                max: MAX_MINUTES,
            });
        }
        let total_seconds = minutes * 60;
        Ok(Self {
            total_seconds,
            remaining_seconds: total_seconds,
            running: true,
        })
    }

    /// One second elapses. Yields the tick for the new remaining time,
    /// or None once the countdown already hit zero.
    pub fn advance(&mut self) -> Option<Tick> {
        if !self.running || self.remaining_seconds == 0 {
            return None;
        }
        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.running = false;
        }
        Some(Tick {
            total_seconds: self.total_seconds,
            remaining_seconds: self.remaining_seconds,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_seconds == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick(Tick),
    /// Sent exactly once, after the zero tick. Never sent on cancel.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    Completed,
    Cancelled,
}

/// Countdown for the manual-intervention phase.
/// Suspends once per period and checks the token at every boundary.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    state: TimerState,
    period: Duration,
}

impl CountdownTimer {
    pub fn new(minutes: u32) -> Result<Self, KernelError> {
        Ok(Self {
            state: TimerState::start(minutes)?,
            period: Duration::from_millis(TICK_MS),
        })
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub async fn run(
        mut self,
        tx: mpsc::Sender<TimerEvent>,
        cancel: CancellationToken,
    ) -> TimerOutcome {
        info!(total_seconds = self.state.total_seconds, "Countdown started");

        let mut cadence = interval_at(Instant::now() + self.period, self.period);
        cadence.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(remaining = self.state.remaining_seconds, "Countdown cancelled");
                    return TimerOutcome::Cancelled;
                }
                _ = cadence.tick() => {}
            }

            let Some(tick) = self.state.advance() else { break };
            if tx.send(TimerEvent::Tick(tick)).await.is_err() {
                debug!("Countdown receiver dropped");
                return TimerOutcome::Cancelled;
            }
            if tick.is_final() {
                break;
            }
        }

        // A cancel that raced the last tick still wins.
        if cancel.is_cancelled() {
            return TimerOutcome::Cancelled;
        }

        if tx.send(TimerEvent::Complete).await.is_err() {
            debug!("Countdown receiver dropped before completion");
        }
        info!("Countdown complete");
        TimerOutcome::Completed
    }

    /// Runs the countdown on its own task.
    pub fn spawn(
        self,
        cancel: CancellationToken,
    ) -> (mpsc::Receiver<TimerEvent>, JoinHandle<TimerOutcome>) {
        // Room for the whole countdown so a slow consumer never stalls the clock.
        let capacity = self.state.total_seconds as usize + 1;
        let (tx, rx) = mpsc::channel(capacity);
        let handle = tokio::spawn(self.run(tx, cancel));
        (rx, handle)
    }
}

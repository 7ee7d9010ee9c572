//! Countdown timer and stopwatch.
//!
//! [`Timer`] is a plain state machine advanced one second per [`Timer::tick`].
//! [`TimerHandle`] owns a shared timer and drives it from a tokio task that
//! only exists while the timer is running.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Countdown,
    Stopwatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("cannot {action} a timer that is {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: TimerState,
    },

    #[error("countdown has no time set")]
    EmptyPreset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    mode: TimerMode,
    state: TimerState,
    preset_secs: u64,
    remaining_secs: u64,
    elapsed_secs: u64,
}

impl Timer {
    pub fn countdown(minutes: u32) -> Self {
        Self {
            mode: TimerMode::Countdown,
            state: TimerState::Idle,
            preset_secs: u64::from(minutes) * 60,
            remaining_secs: 0,
            elapsed_secs: 0,
        }
    }

    pub fn stopwatch() -> Self {
        Self {
            mode: TimerMode::Stopwatch,
            ..Self::countdown(0)
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn preset_secs(&self) -> u64 {
        self.preset_secs
    }

    /// Seconds left for a countdown, seconds elapsed for a stopwatch.
    pub fn seconds(&self) -> u64 {
        match self.mode {
            TimerMode::Countdown => self.remaining_secs,
            TimerMode::Stopwatch => self.elapsed_secs,
        }
    }

    pub fn display(&self) -> String {
        format_clock(self.seconds())
    }

    /// Switching mode resets the timer.
    pub fn set_mode(&mut self, mode: TimerMode) -> Result<(), TimerError> {
        self.ensure_stopped("change the mode of")?;
        self.mode = mode;
        self.reset();
        Ok(())
    }

    /// New countdown length, used the next time the countdown starts from zero.
    pub fn set_preset_minutes(&mut self, minutes: u32) -> Result<(), TimerError> {
        self.ensure_stopped("set the time of")?;
        self.preset_secs = u64::from(minutes) * 60;
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), TimerError> {
        self.ensure_stopped("start")?;
        if self.mode == TimerMode::Countdown && self.remaining_secs == 0 {
            if self.preset_secs == 0 {
                return Err(TimerError::EmptyPreset);
            }
            self.remaining_secs = self.preset_secs;
        }
        self.state = TimerState::Running;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), TimerError> {
        if self.state != TimerState::Running {
            return Err(TimerError::InvalidTransition {
                action: "pause",
                state: self.state,
            });
        }
        self.state = TimerState::Paused;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.remaining_secs = 0;
        self.elapsed_secs = 0;
    }

    /// Advances a running timer by one second and returns the new state.
    pub fn tick(&mut self) -> TimerState {
        if self.state != TimerState::Running {
            return self.state;
        }
        match self.mode {
            TimerMode::Countdown => {
                self.remaining_secs = self.remaining_secs.saturating_sub(1);
                if self.remaining_secs == 0 {
                    self.state = TimerState::Completed;
                }
            }
            TimerMode::Stopwatch => self.elapsed_secs += 1,
        }
        self.state
    }

    fn ensure_stopped(&self, action: &'static str) -> Result<(), TimerError> {
        if self.state == TimerState::Running {
            return Err(TimerError::InvalidTransition {
                action,
                state: self.state,
            });
        }
        Ok(())
    }
}

/// `MM:SS`, or `HH:MM:SS` from one hour on.
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

struct Shared {
    timer: Mutex<Timer>,
    ticker: Mutex<Option<JoinHandle<()>>>,
    period: Duration,
}

/// A timer driven in the background. Must be used inside a tokio runtime.
#[derive(Clone)]
pub struct TimerHandle {
    shared: Arc<Shared>,
}

impl TimerHandle {
    pub fn new(timer: Timer) -> Self {
        Self::with_period(timer, Duration::from_secs(1))
    }

    /// Ticks every `period` instead of every second.
    pub fn with_period(timer: Timer, period: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                timer: Mutex::new(timer),
                ticker: Mutex::new(None),
                period,
            }),
        }
    }

    pub fn snapshot(&self) -> Timer {
        self.shared.timer.lock().clone()
    }

    /// Applies a mode and/or countdown length; not allowed while running.
    pub fn configure(&self, mode: Option<TimerMode>, minutes: Option<u32>) -> Result<Timer, TimerError> {
        let mut timer = self.shared.timer.lock();
        if let Some(mode) = mode {
            if mode != timer.mode() {
                timer.set_mode(mode)?;
            }
        }
        if let Some(minutes) = minutes {
            timer.set_preset_minutes(minutes)?;
        }
        Ok(timer.clone())
    }

    // The ticker slot only changes while the timer lock is held, so a
    // pause or reset cannot abort a ticker started after it.
    pub fn start(&self) -> Result<Timer, TimerError> {
        let mut timer = self.shared.timer.lock();
        timer.start()?;
        self.replace_ticker(Some(self.spawn_ticker()));
        debug!(mode = ?timer.mode(), seconds = timer.seconds(), "timer started");
        Ok(timer.clone())
    }

    pub fn pause(&self) -> Result<Timer, TimerError> {
        let mut timer = self.shared.timer.lock();
        timer.pause()?;
        self.replace_ticker(None);
        debug!(seconds = timer.seconds(), "timer paused");
        Ok(timer.clone())
    }

    pub fn reset(&self) -> Timer {
        let mut timer = self.shared.timer.lock();
        timer.reset();
        self.replace_ticker(None);
        debug!("timer reset");
        timer.clone()
    }

    fn spawn_ticker(&self) -> JoinHandle<()> {
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        let period = self.shared.period;
        tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                let Some(shared) = shared.upgrade() else {
                    break;
                };
                let state = shared.timer.lock().tick();
                match state {
                    TimerState::Running => {}
                    TimerState::Completed => {
                        info!("countdown finished");
                        break;
                    }
                    _ => break,
                }
            }
        })
    }

    fn replace_ticker(&self, task: Option<JoinHandle<()>>) {
        let mut ticker = self.shared.ticker.lock();
        if let Some(previous) = std::mem::replace(&mut *ticker, task) {
            previous.abort();
        }
    }
}

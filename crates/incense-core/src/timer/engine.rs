//! Countdown state machine for a single stick.
//!
//! The engine is tick-driven: it has no thread and no notion of wall time.
//! Whoever owns it (see [`TimerController`](super::TimerController)) calls
//! `tick()` once per cadence period while it is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |
//!           v
//!       Completed -> (start) -> Running
//! ```
//!
//! `reset` and `set_duration` return to `Idle` from anywhere.

use serde::{Deserialize, Serialize};

use super::StickLength;
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Not running, full stick remaining.
    Idle,
    Running,
    /// Not running, part of the stick burnt.
    Paused,
    /// Not running, nothing remaining.
    Completed,
}

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    total_secs: u32,
    remaining_secs: u32,
    running: bool,
    /// Length the current session was started with.
    session_secs: Option<u32>,
}

impl TimerEngine {
    /// Create an idle engine with `total_secs` remaining.
    ///
    /// # Errors
    /// Returns an error if `total_secs` is zero.
    pub fn new(total_secs: u32) -> Result<Self, ValidationError> {
        validate_total(total_secs)?;
        Ok(Self::idle(total_secs))
    }

    /// Idle engine for a selectable stick length.
    pub fn with_length(length: StickLength) -> Self {
        Self::idle(length.secs())
    }

    fn idle(total_secs: u32) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
            running: false,
            session_secs: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        if self.running {
            TimerState::Running
        } else if self.remaining_secs == 0 {
            TimerState::Completed
        } else if self.remaining_secs == self.total_secs {
            TimerState::Idle
        } else {
            TimerState::Paused
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    /// 0.0 .. 1.0 progress through the stick.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / self.total_secs as f64)
    }

    /// Remaining time as `mm:ss`.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            is_running: self.running,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            progress: self.progress(),
            display: self.display(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume. Starting from zero reseeds the full stick first.
    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        let resumed = self.remaining_secs != 0 && self.remaining_secs != self.total_secs;
        if self.remaining_secs == 0 {
            self.remaining_secs = self.total_secs;
        }
        self.running = true;
        self.session_secs = Some(self.total_secs);
        Some(Event::TimerStarted {
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            resumed,
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
        })
    }

    pub fn reset(&mut self) -> Event {
        self.running = false;
        self.remaining_secs = self.total_secs;
        self.session_secs = None;
        Event::TimerReset {
            total_secs: self.total_secs,
        }
    }

    /// Reconfigure the stick. Always halts an in-progress session.
    ///
    /// # Errors
    /// Returns an error if `total_secs` is zero; the engine is left untouched.
    pub fn set_duration(&mut self, total_secs: u32) -> Result<Event, ValidationError> {
        validate_total(total_secs)?;
        *self = Self::idle(total_secs);
        Ok(Event::DurationChanged { total_secs })
    }

    /// Reconfigure to a selectable stick length.
    pub fn set_length(&mut self, length: StickLength) -> Event {
        *self = Self::idle(length.secs());
        Event::DurationChanged {
            total_secs: length.secs(),
        }
    }

    /// Advance one second. Returns `Event::TimerCompleted` when the stick
    /// burns out, `Event::TimerTicked` otherwise, and `None` when not running.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            let duration_secs = self.session_secs.take().unwrap_or(self.total_secs);
            return Some(Event::TimerCompleted { duration_secs });
        }
        Some(Event::TimerTicked {
            remaining_secs: self.remaining_secs,
        })
    }
}

fn validate_total(total_secs: u32) -> Result<(), ValidationError> {
    if total_secs == 0 {
        return Err(ValidationError::InvalidValue {
            field: "total_secs".into(),
            message: "duration must be positive".into(),
        });
    }
    Ok(())
}

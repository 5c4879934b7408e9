use serde::{Deserialize, Serialize};

use crate::history::SessionRecord;
use crate::timer::TimerState;

/// Every state change in the system produces an Event.
/// Front ends render them; the CLI prints them as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        remaining_secs: u32,
        total_secs: u32,
        /// True when continuing a paused session rather than starting fresh.
        resumed: bool,
    },
    TimerPaused {
        remaining_secs: u32,
    },
    TimerReset {
        total_secs: u32,
    },
    DurationChanged {
        total_secs: u32,
    },
    TimerTicked {
        remaining_secs: u32,
    },
    /// The countdown reached zero. Carries the length the session started with.
    TimerCompleted {
        duration_secs: u32,
    },
    SessionRecorded {
        record: SessionRecord,
    },
    HistoryCleared {
        removed: usize,
    },
    StateSnapshot {
        state: TimerState,
        is_running: bool,
        remaining_secs: u32,
        total_secs: u32,
        progress: f64,
        display: String,
    },
}

//! # Incense Core Library
//!
//! Core logic for Incense, a single-stick countdown timer. The CLI is a thin
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Clock**: injectable wall-clock source ([`Clock`])
//! - **Timer**: tick-driven state machine ([`TimerEngine`]) owned by a
//!   [`TimerController`] together with its one-second [`Cadence`]
//! - **History**: the last 20 completed sessions, written through to a
//!   fail-soft [`HistoryStore`] by the [`SessionRecorder`]
//! - **Content**: the quote of the day, a pure function of the local date
//! - **Storage**: SQLite key-value records and TOML configuration
//!
//! ## Key Components
//!
//! - [`TimerController`]: start/pause/reset/set_duration plus cadence ticks
//! - [`drive`]: async loop feeding commands and ticks into a controller
//! - [`SessionRecorder`]: completion → [`SessionRecord`] → store
//! - [`Config`]: application configuration management

pub mod chime;
pub mod clock;
pub mod content;
pub mod error;
pub mod events;
pub mod history;
pub mod storage;
pub mod timer;

pub use chime::{Chime, CommandChime, NoopChime, TerminalBell};
pub use clock::{Clock, ManualClock, SystemClock};
pub use content::{archive, quote_for, quote_of_the_day, Quote};
pub use error::{ChimeError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use history::{
    History, HistoryStats, HistoryStore, MemoryHistoryStore, NullHistoryStore, SessionRecord,
    SessionRecorder, SqliteHistoryStore, HISTORY_CAP,
};
pub use storage::{Config, Database};
pub use timer::{drive, Cadence, Command, StickLength, TimerController, TimerEngine, TimerState};

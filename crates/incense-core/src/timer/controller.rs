//! Ties the engine to its cadence, the session recorder and the chime.
//!
//! Every command that leaves `Running` disarms the cadence *before* touching
//! the engine, and `tick` refuses to run while disarmed, so a tick that races
//! a cancellation is dropped.

use super::{Cadence, StickLength, TimerEngine};
use crate::chime::{ring_contained, Chime};
use crate::error::ValidationError;
use crate::events::Event;
use crate::history::{History, HistoryStore, SessionRecorder};

pub struct TimerController<S: HistoryStore> {
    engine: TimerEngine,
    cadence: Cadence,
    recorder: SessionRecorder<S>,
    chime: Box<dyn Chime>,
}

impl<S: HistoryStore> TimerController<S> {
    /// Idle controller for a stick of `length`.
    pub fn new(length: StickLength, recorder: SessionRecorder<S>, chime: Box<dyn Chime>) -> Self {
        Self::with_cadence(length, recorder, chime, Cadence::default())
    }

    pub fn with_cadence(
        length: StickLength,
        recorder: SessionRecorder<S>,
        chime: Box<dyn Chime>,
        cadence: Cadence,
    ) -> Self {
        Self {
            engine: TimerEngine::with_length(length),
            cadence,
            recorder,
            chime,
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    pub fn history(&self) -> &History {
        self.recorder.history()
    }

    pub fn recorder(&self) -> &SessionRecorder<S> {
        &self.recorder
    }

    pub fn snapshot(&self) -> Event {
        self.engine.snapshot()
    }

    pub fn start(&mut self) -> Option<Event> {
        let event = self.engine.start();
        if self.engine.is_running() {
            self.cadence.arm();
        }
        if event.is_some() {
            tracing::debug!(remaining_secs = self.engine.remaining_secs(), "timer started");
        }
        event
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.cadence.disarm();
        let event = self.engine.pause();
        if event.is_some() {
            tracing::debug!(remaining_secs = self.engine.remaining_secs(), "timer paused");
        }
        event
    }

    pub fn reset(&mut self) -> Event {
        self.cadence.disarm();
        tracing::debug!("timer reset");
        self.engine.reset()
    }

    pub fn set_duration(&mut self, length: StickLength) -> Event {
        self.cadence.disarm();
        tracing::debug!(minutes = length.minutes(), "stick length changed");
        self.engine.set_length(length)
    }

    /// Set the stick length from raw seconds.
    ///
    /// # Errors
    /// Returns an error for a zero duration; nothing changes in that case.
    pub fn set_duration_secs(&mut self, secs: u32) -> Result<Event, ValidationError> {
        if secs == 0 {
            return self.engine.set_duration(secs);
        }
        self.cadence.disarm();
        self.engine.set_duration(secs)
    }

    /// Process one cadence tick.
    ///
    /// On completion the cadence is disarmed, the session is recorded and
    /// the chime rung, in that order. Returns the events produced.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.cadence.is_armed() {
            return Vec::new();
        }
        match self.engine.tick() {
            Some(Event::TimerCompleted { duration_secs }) => {
                self.cadence.disarm();
                let record = self.recorder.record(duration_secs);
                ring_contained(self.chime.as_ref());
                vec![
                    Event::TimerCompleted { duration_secs },
                    Event::SessionRecorded { record },
                ]
            }
            Some(event) => vec![event],
            None => {
                // Engine stopped without us noticing; keep the two in step.
                self.cadence.disarm();
                Vec::new()
            }
        }
    }

    pub fn clear_history(&mut self) -> Event {
        let removed = self.recorder.clear();
        Event::HistoryCleared { removed }
    }

    /// Tear down: stop the cadence. The engine keeps its remaining time.
    pub fn shutdown(&mut self) {
        self.cadence.disarm();
        self.engine.pause();
    }

    /// Wait for the next cadence tick. Pending forever while not running.
    pub async fn next_tick(&mut self) {
        self.cadence.wait().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chime::NoopChime;
    use crate::clock::ManualClock;
    use crate::error::ChimeError;
    use crate::history::MemoryHistoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct CountingChime(Arc<AtomicUsize>);

    impl Chime for CountingChime {
        fn ring(&self) -> Result<(), ChimeError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(ChimeError::Unavailable("muted".into()))
        }
    }

    fn controller(minutes: u32) -> (TimerController<MemoryHistoryStore>, MemoryHistoryStore) {
        let store = MemoryHistoryStore::new();
        let recorder = SessionRecorder::load(store.clone(), Arc::new(ManualClock::new(1_000_000_000)));
        let length = StickLength::from_minutes(minutes).unwrap();
        (TimerController::new(length, recorder, Box::new(NoopChime)), store)
    }

    #[test]
    fn start_arms_and_pause_disarms() {
        let (mut c, _) = controller(5);
        c.start();
        assert!(c.cadence().is_armed());
        c.pause();
        assert!(!c.cadence().is_armed());
        assert!(c.tick().is_empty());
        assert_eq!(c.engine().remaining_secs(), 300);
    }

    #[test]
    fn completion_records_once_and_disarms() {
        let (mut c, store) = controller(5);
        c.start();
        let mut recorded = Vec::new();
        for _ in 0..300 {
            for event in c.tick() {
                if let Event::SessionRecorded { record } = event {
                    recorded.push(record);
                }
            }
        }
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].duration, 300);
        assert_eq!(recorded[0].ended_at - recorded[0].started_at, 300_000);
        assert!(!c.cadence().is_armed());
        assert!(!c.engine().is_running());
        assert_eq!(c.engine().remaining_secs(), 0);
        assert!(c.tick().is_empty());
        // Load plus one completion.
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn chime_failure_does_not_block_recording() {
        let store = MemoryHistoryStore::new();
        let recorder = SessionRecorder::load(store.clone(), Arc::new(ManualClock::new(42_000_000)));
        let chime = CountingChime::default();
        let rings = chime.0.clone();
        let mut c = TimerController::new(StickLength::from_minutes(5).unwrap(), recorder, Box::new(chime));
        c.start();
        for _ in 0..300 {
            c.tick();
        }
        assert_eq!(rings.load(Ordering::SeqCst), 1);
        assert_eq!(c.history().len(), 1);
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn set_duration_while_running_stops_the_run() {
        let (mut c, _) = controller(10);
        c.start();
        c.tick();
        let event = c.set_duration(StickLength::from_minutes(25).unwrap());
        assert_eq!(event, Event::DurationChanged { total_secs: 1500 });
        assert!(!c.cadence().is_armed());
        assert!(!c.engine().is_running());
        assert_eq!(c.engine().remaining_secs(), 1500);
    }

    #[test]
    fn zero_seconds_is_rejected_without_stopping() {
        let (mut c, _) = controller(5);
        c.start();
        assert!(c.set_duration_secs(0).is_err());
        assert!(c.cadence().is_armed());
        assert!(c.set_duration_secs(90).is_ok());
        assert!(!c.cadence().is_armed());
        assert_eq!(c.engine().total_secs(), 90);
    }

    #[test]
    fn shutdown_stops_cadence() {
        let (mut c, _) = controller(5);
        c.start();
        c.shutdown();
        assert!(!c.cadence().is_armed());
        assert!(!c.engine().is_running());
    }

    #[test]
    fn clear_history_reports_removed() {
        let (mut c, store) = controller(5);
        c.start();
        for _ in 0..300 {
            c.tick();
        }
        assert_eq!(c.clear_history(), Event::HistoryCleared { removed: 1 });
        assert!(store.load().is_empty());
    }
}

//! Turns timer completions into history records.

use std::sync::Arc;

use super::{History, HistoryStore, SessionRecord};
use crate::clock::Clock;

/// Owns the in-memory history and writes it through to a [`HistoryStore`]
/// after every mutation. One mutation, one save.
pub struct SessionRecorder<S: HistoryStore> {
    store: S,
    clock: Arc<dyn Clock>,
    history: History,
}

impl<S: HistoryStore> SessionRecorder<S> {
    /// Load the history from `store`, normalize it and write it back.
    pub fn load(store: S, clock: Arc<dyn Clock>) -> Self {
        let history = History::from_records(store.load());
        tracing::info!(sessions = history.len(), "history loaded");
        store.save(&history);
        Self {
            store,
            clock,
            history,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Record a session of `duration_secs` that ends now.
    pub fn record(&mut self, duration_secs: u32) -> SessionRecord {
        let mut record = SessionRecord::ended(self.clock.now_ms(), duration_secs);
        if self.history.contains_id(&record.id) {
            let base = record.id.clone();
            let mut n = 1u32;
            while self.history.contains_id(&record.id) {
                record.id = format!("{base}-{n}");
                n += 1;
            }
        }

        let evicted = self.history.prepend(record.clone());
        for old in &evicted {
            tracing::debug!(id = %old.id, "evicted oldest session");
        }
        self.store.save(&self.history);
        tracing::info!(id = %record.id, duration_secs, "session recorded");
        record
    }

    /// Drop all history. Returns how many records were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.history.clear();
        self.store.save(&self.history);
        removed
    }
}

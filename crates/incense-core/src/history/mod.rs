//! Completed-session history.
//!
//! - [`SessionRecord`]: one burnt-out stick, immutable once written
//! - [`History`]: newest-first, capped at [`HISTORY_CAP`], unique ids
//! - [`HistoryStore`]: fail-soft `load`/`save` persistence seam
//! - [`SessionRecorder`]: turns completions into records and writes through

mod recorder;
mod stats;
mod store;

pub use recorder::SessionRecorder;
pub use stats::HistoryStats;
pub use store::{
    decode_history, encode_history, HistoryStore, MemoryHistoryStore, NullHistoryStore,
    SqliteHistoryStore, HISTORY_KEY,
};

use serde::{Deserialize, Serialize};

/// Maximum number of sessions kept.
pub const HISTORY_CAP: usize = 20;

/// One completed session. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub started_at: i64,
    pub ended_at: i64,
    /// Stick length in seconds.
    pub duration: u32,
}

impl SessionRecord {
    /// Record for a session of `duration` seconds that ended at `ended_at`.
    pub fn ended(ended_at: i64, duration: u32) -> Self {
        Self {
            id: ended_at.to_string(),
            started_at: ended_at.saturating_sub(i64::from(duration) * 1000),
            ended_at,
            duration,
        }
    }
}

/// Ordered session history, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<SessionRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize arbitrary records: sort newest first, drop repeated ids
    /// (the newer record wins) and keep the newest [`HISTORY_CAP`].
    pub fn from_records(mut records: Vec<SessionRecord>) -> Self {
        records.sort_by(|a, b| b.ended_at.cmp(&a.ended_at));
        let mut seen = std::collections::HashSet::new();
        records.retain(|r| seen.insert(r.id.clone()));
        records.truncate(HISTORY_CAP);
        Self { records }
    }

    /// Prepend a record and truncate to the cap. Returns evicted records,
    /// oldest last.
    pub fn prepend(&mut self, record: SessionRecord) -> Vec<SessionRecord> {
        self.records.insert(0, record);
        if self.records.len() > HISTORY_CAP {
            self.records.split_off(HISTORY_CAP)
        } else {
            Vec::new()
        }
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SessionRecord> {
        self.records.iter()
    }

    pub fn newest(&self) -> Option<&SessionRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove everything, returning how many records were dropped.
    pub fn clear(&mut self) -> usize {
        let n = self.records.len();
        self.records.clear();
        n
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a SessionRecord;
    type IntoIter = std::slice::Iter<'a, SessionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ended_derives_start_and_id() {
        let r = SessionRecord::ended(1_700_000_300_000, 300);
        assert_eq!(r.id, "1700000300000");
        assert_eq!(r.started_at, 1_700_000_000_000);
        assert_eq!(r.ended_at - r.started_at, 300 * 1000);
    }

    #[test]
    fn ended_clamps_start_at_the_epoch_floor() {
        let r = SessionRecord::ended(i64::MIN + 1000, 300);
        assert_eq!(r.started_at, i64::MIN);
    }

    #[test]
    fn from_records_sorts_dedupes_and_caps() {
        let mut records: Vec<_> = (0..25).map(|i| SessionRecord::ended(i * 1000, 1)).collect();
        records.push(SessionRecord::ended(3000, 1));
        records.reverse();
        records.swap(0, 7);

        let history = History::from_records(records);
        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history.newest().unwrap().ended_at, 24_000);
        assert_eq!(history.records().last().unwrap().ended_at, 5_000);
        assert!(history
            .records()
            .windows(2)
            .all(|w| w[0].ended_at > w[1].ended_at));
    }

    #[test]
    fn prepend_evicts_oldest() {
        let mut history = History::new();
        for i in 1..=HISTORY_CAP as i64 {
            assert!(history.prepend(SessionRecord::ended(i * 1000, 1)).is_empty());
        }
        let evicted = history.prepend(SessionRecord::ended(21_000, 1));
        assert_eq!(evicted, vec![SessionRecord::ended(1000, 1)]);
        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history.newest().unwrap().ended_at, 21_000);
        assert!(!history.contains_id("1000"));
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut history = History::new();
        history.prepend(SessionRecord::ended(5_000, 2));
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"id": "5000", "startedAt": 3000, "endedAt": 5000, "duration": 2}])
        );
    }

    proptest! {
        #[test]
        fn prepending_never_exceeds_cap(n in 0usize..60) {
            let mut history = History::new();
            for i in 0..n {
                history.prepend(SessionRecord::ended(i as i64 * 1000 + 1, 1));
                prop_assert!(history.len() <= HISTORY_CAP);
            }
            prop_assert_eq!(history.len(), n.min(HISTORY_CAP));
        }

        #[test]
        fn from_records_is_bounded_and_unique(ends in proptest::collection::vec(0i64..500, 0..80)) {
            let records = ends.iter().map(|&e| SessionRecord::ended(e, 1)).collect();
            let history = History::from_records(records);
            prop_assert!(history.len() <= HISTORY_CAP);
            let ids: std::collections::HashSet<_> = history.iter().map(|r| r.id.clone()).collect();
            prop_assert_eq!(ids.len(), history.len());
        }
    }
}

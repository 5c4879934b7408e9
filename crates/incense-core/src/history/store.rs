//! History persistence.
//!
//! The history is stored as a single JSON array under [`HISTORY_KEY`]:
//!
//! ```json
//! [{"id": "1715083200000", "startedAt": 1715082900000, "endedAt": 1715083200000, "duration": 300}]
//! ```
//!
//! Stores are fail-soft. `load` never errors: unreadable data is logged and
//! treated as an empty history, and malformed entries are dropped one by one.
//! `save` never errors either; a failed write is logged and forgotten.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::{History, SessionRecord};
use crate::error::{CoreError, Result};
use crate::storage::Database;

/// Namespaced key of the history record.
pub const HISTORY_KEY: &str = "incense.history";

/// Persistence seam for the session history.
pub trait HistoryStore {
    /// Read the stored history, newest first. Empty on any failure.
    fn load(&self) -> Vec<SessionRecord>;

    /// Persist the history. Fire-and-forget.
    fn save(&self, history: &History);
}

/// Parse a stored history document.
///
/// Fails only if `raw` is not a JSON array. Entries without numeric
/// `endedAt` and positive numeric `duration` are skipped, as are entries
/// whose start would fall outside the `i64` range. `startedAt` is always
/// derived from `endedAt` and `duration`; a missing `id` becomes the
/// `endedAt` string.
pub fn decode_history(raw: &str) -> Result<Vec<SessionRecord>> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Array(entries) = value else {
        return Err(CoreError::Json(serde::de::Error::custom(
            "history is not a JSON array",
        )));
    };

    let total = entries.len();
    let mut records: Vec<SessionRecord> = entries.iter().filter_map(decode_entry).collect();
    if records.len() < total {
        tracing::debug!(
            dropped = total - records.len(),
            "skipped malformed history entries"
        );
    }
    records.sort_by(|a, b| b.ended_at.cmp(&a.ended_at));
    Ok(records)
}

/// Serialize a history to its stored form.
pub fn encode_history(history: &History) -> Result<String> {
    Ok(serde_json::to_string(history)?)
}

fn decode_entry(entry: &Value) -> Option<SessionRecord> {
    let obj = entry.as_object()?;
    let ended_at = as_integer(obj.get("endedAt")?)?;
    let duration = u32::try_from(as_integer(obj.get("duration")?)?).ok()?;
    if duration == 0 {
        return None;
    }

    let started_at = ended_at.checked_sub(i64::from(duration).checked_mul(1000)?)?;
    let id = match obj.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => ended_at.to_string(),
    };

    Some(SessionRecord {
        id,
        started_at,
        ended_at,
        duration,
    })
}

/// Any JSON number, truncated toward zero.
fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
            .map(|f| f.trunc() as i64)
    })
}

/// History persisted in the SQLite kv table.
pub struct SqliteHistoryStore {
    db: Option<Database>,
}

impl SqliteHistoryStore {
    pub fn new(db: Database) -> Self {
        Self { db: Some(db) }
    }

    /// Open the default database. If it cannot be opened the store runs
    /// without a backend: loads are empty and saves do nothing.
    pub fn open() -> Self {
        match Database::open() {
            Ok(db) => Self::new(db),
            Err(e) => {
                tracing::warn!(error = %e, "history database unavailable; history will not persist");
                Self::unavailable()
            }
        }
    }

    pub fn unavailable() -> Self {
        Self { db: None }
    }

    pub fn is_available(&self) -> bool {
        self.db.is_some()
    }

    /// Fallible load, for callers that want to see the error.
    pub fn try_load(&self) -> Result<Vec<SessionRecord>> {
        let Some(db) = &self.db else {
            return Ok(Vec::new());
        };
        match db.kv_get(HISTORY_KEY)? {
            Some(raw) => decode_history(&raw),
            None => Ok(Vec::new()),
        }
    }

    /// Fallible save, for callers that want to see the error.
    pub fn try_save(&self, history: &History) -> Result<()> {
        let Some(db) = &self.db else {
            return Ok(());
        };
        db.kv_set(HISTORY_KEY, &encode_history(history)?)?;
        Ok(())
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn load(&self) -> Vec<SessionRecord> {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load history; starting empty");
            Vec::new()
        })
    }

    fn save(&self, history: &History) {
        if let Err(e) = self.try_save(history) {
            tracing::warn!(error = %e, "failed to save history");
        }
    }
}

/// In-process store. Clones share the same slot, so a caller can keep a
/// handle to inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    inner: Arc<Mutex<MemorySlot>>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    raw: Option<String>,
    writes: usize,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a raw stored document.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut slot) = store.inner.lock() {
            slot.raw = Some(raw.into());
        }
        store
    }

    /// The last document written, if any.
    pub fn raw(&self) -> Option<String> {
        self.inner.lock().ok().and_then(|slot| slot.raw.clone())
    }

    /// Number of saves performed.
    pub fn writes(&self) -> usize {
        self.inner.lock().map(|slot| slot.writes).unwrap_or(0)
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Vec<SessionRecord> {
        let Some(raw) = self.raw() else {
            return Vec::new();
        };
        decode_history(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to parse history; starting empty");
            Vec::new()
        })
    }

    fn save(&self, history: &History) {
        let raw = match encode_history(history) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode history");
                return;
            }
        };
        match self.inner.lock() {
            Ok(mut slot) => {
                slot.raw = Some(raw);
                slot.writes += 1;
            }
            Err(_) => tracing::warn!("history slot poisoned; save skipped"),
        }
    }
}

/// No persistence backend at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHistoryStore;

impl HistoryStore for NullHistoryStore {
    fn load(&self) -> Vec<SessionRecord> {
        Vec::new()
    }

    fn save(&self, _history: &History) {}
}

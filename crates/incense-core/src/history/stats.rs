use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::History;
use crate::clock::local_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HistoryStats {
    pub total_sessions: u64,
    pub total_secs: u64,
    pub today_sessions: u64,
    pub today_secs: u64,
}

impl HistoryStats {
    /// Totals over `history`, with "today" meaning sessions that ended on
    /// local date `today`.
    pub fn compute(history: &History, today: NaiveDate) -> Self {
        history.iter().fold(Self::default(), |mut stats, record| {
            stats.total_sessions += 1;
            stats.total_secs += u64::from(record.duration);
            if local_date(record.ended_at) == today {
                stats.today_sessions += 1;
                stats.today_secs += u64::from(record.duration);
            }
            stats
        })
    }
}

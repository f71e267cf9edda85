use chrono::{DateTime, Duration, Utc};

use crate::constants::MAX_TREND_WINDOW;

/// Which slice of an epoch's records a query returns (newest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordWindow {
    /// Maximum number of records, capped at [`MAX_TREND_WINDOW`].
    pub limit: usize,
    /// Only records created at or after this instant.
    pub since: Option<DateTime<Utc>>,
}

impl RecordWindow {
    pub fn latest(limit: usize) -> Self {
        Self {
            limit: limit.min(MAX_TREND_WINDOW),
            since: None,
        }
    }

    /// The newest `limit` records from the last `days` days before `now`.
    pub fn recent(limit: usize, days: Option<u32>, now: DateTime<Utc>) -> Self {
        Self {
            limit: limit.min(MAX_TREND_WINDOW),
            since: days.map(|d| now - Duration::days(i64::from(d))),
        }
    }
}

impl Default for RecordWindow {
    fn default() -> Self {
        Self::latest(MAX_TREND_WINDOW)
    }
}

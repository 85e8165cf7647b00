//! Recency window for feed entries

use chrono::{DateTime, NaiveDateTime, Utc};
use std::time::Duration;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Accepts timestamps no older than `lookback`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    lookback: Duration,
}

impl TimeWindow {
    /// Create a window reaching `lookback` into the past
    pub fn new(lookback: Duration) -> Self {
        Self { lookback }
    }

    /// Window length
    pub fn lookback(&self) -> Duration {
        self.lookback
    }

    /// Parse a feed timestamp
    ///
    /// Tries RFC 2822, then RFC 3339, then two naive layouts read as UTC.
    pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    /// Whether `timestamp` falls inside the window ending now
    pub fn contains(&self, timestamp: Option<&str>) -> bool {
        self.contains_at(timestamp, Utc::now())
    }

    /// Whether `timestamp` falls inside the window ending at `now`
    ///
    /// Missing or unparseable timestamps are outside. The oldest edge is
    /// inclusive; timestamps after `now` are inside.
    pub fn contains_at(&self, timestamp: Option<&str>, now: DateTime<Utc>) -> bool {
        let Some(published) = timestamp.and_then(Self::parse_timestamp) else {
            return false;
        };
        let Ok(lookback) = chrono::Duration::from_std(self.lookback) else {
            return true;
        };
        now.signed_duration_since(published) <= lookback
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::new(Duration::from_secs(24 * 3600))
    }
}

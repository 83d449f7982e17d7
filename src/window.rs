use chrono::{DateTime, Duration, Utc};

use crate::error::DigestError;

/// Jira's own serialisation: fractional seconds and a colon-less offset,
/// e.g. `2024-05-01T10:00:00.000-0700`.
const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// The look-back window of a digest run, anchored at `now`.
///
/// Only the lower bound is enforced: anything newer than `now - hours`,
/// including timestamps in the future, is inside.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    now: DateTime<Utc>,
    span: Duration,
}

impl TimeWindow {
    pub fn new(now: DateTime<Utc>, hours: u32) -> Self {
        Self {
            now,
            span: Duration::hours(i64::from(hours)),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.now - at <= self.span
    }

    /// Parses `value` and tests it against the window. `issue` only labels
    /// the error.
    pub fn contains_timestamp(&self, issue: &str, value: &str) -> Result<bool, DigestError> {
        parse_timestamp(issue, value).map(|at| self.contains(at))
    }
}

pub fn parse_timestamp(issue: &str, value: &str) -> Result<DateTime<Utc>, DigestError> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, JIRA_TIMESTAMP_FORMAT))
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| DigestError::InvalidTimestamp {
            issue: issue.to_string(),
            value: value.to_string(),
            source,
        })
}

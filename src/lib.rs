//! Per-issue digests of recent Jira activity.
//!
//! A [`Digester`] takes issues that were already fetched (see
//! [`models::parse_search_response`]), keeps the creation events, changelog
//! transitions and comments that fall inside the configured window and were
//! not made by the excluded user, folds them per field policy and returns a
//! [`Digest`] ordered by issue key.

pub mod collate;
pub mod config;
pub mod consolidate;
pub mod error;
pub mod extract;
pub mod issue;
pub mod models;
pub mod text;
pub mod window;

use chrono::{DateTime, Utc};

pub use collate::Digest;
pub use config::{DigestConfig, EmptyConsolidation, FieldPolicy, PolicyTable};
pub use error::DigestError;
pub use issue::{Actor, Issue, IssueRecord, SummaryEntry};

use collate::collate;
use consolidate::consolidate;
use extract::extract;
use window::TimeWindow;

pub struct Digester {
    config: DigestConfig,
}

impl Digester {
    pub fn new(config: DigestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DigestConfig {
        &self.config
    }

    /// Summarizes `records` against the current time.
    pub fn summarize(&self, records: &[IssueRecord]) -> Result<Digest, DigestError> {
        self.summarize_at(records, Utc::now())
    }

    /// Summarizes `records` with the window anchored at `now`. The first
    /// malformed timestamp aborts the run.
    pub fn summarize_at(
        &self,
        records: &[IssueRecord],
        now: DateTime<Utc>,
    ) -> Result<Digest, DigestError> {
        let results = records
            .iter()
            .map(|record| {
                self.summarize_issue_at(record, now)
                    .map(|entries| (record.issue.clone(), entries))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let digest = collate(results);
        tracing::info!(
            issues = records.len(),
            reported = digest.len(),
            entries = digest.entry_count(),
            "summarized issues"
        );
        Ok(digest)
    }

    /// The consolidated entries of a single issue, possibly empty.
    pub fn summarize_issue_at(
        &self,
        record: &IssueRecord,
        now: DateTime<Utc>,
    ) -> Result<Vec<SummaryEntry>, DigestError> {
        let window = TimeWindow::new(now, self.config.window_hours);
        let raw = extract(
            record,
            &window,
            &self.config.excluded_actor,
            &self.config.policies,
        )?;
        let raw_count = raw.len();
        let entries = consolidate(raw, &self.config.policies, self.config.empty_consolidation);

        tracing::debug!(
            issue = %record.issue.key,
            raw = raw_count,
            kept = entries.len(),
            "consolidated issue"
        );
        Ok(entries)
    }
}

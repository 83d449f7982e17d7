use std::collections::BTreeSet;
use std::env;

use crate::error::DigestError;

pub const DEFAULT_WINDOW_HOURS: u32 = 24;

const IGNORED_FIELDS: [&str; 8] = [
    "Story Points",
    "Rank",
    "Sprint",
    "RemoteIssueLink",
    "Attachment",
    "Epic Color",
    "Epic Child",
    "Resolved By",
];
const CONSOLIDATED_FIELDS: [&str; 3] = ["Component", "Version", "Fix Version"];
const TRUNCATED_FIELDS: [&str; 4] = ["Status", "Priority", "Description", "Summary"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    Ignore,
    Consolidate,
    TruncateToLast,
    KeepAll,
}

/// Per-field handling of changelog entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    pub ignored: BTreeSet<String>,
    pub consolidated: BTreeSet<String>,
    pub truncated: BTreeSet<String>,
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self {
            ignored: to_set(&IGNORED_FIELDS),
            consolidated: to_set(&CONSOLIDATED_FIELDS),
            truncated: to_set(&TRUNCATED_FIELDS),
        }
    }
}

impl PolicyTable {
    pub fn empty() -> Self {
        Self {
            ignored: BTreeSet::new(),
            consolidated: BTreeSet::new(),
            truncated: BTreeSet::new(),
        }
    }

    pub fn policy_for(&self, field: &str) -> FieldPolicy {
        if self.ignored.contains(field) {
            FieldPolicy::Ignore
        } else if self.consolidated.contains(field) {
            FieldPolicy::Consolidate
        } else if self.truncated.contains(field) {
            FieldPolicy::TruncateToLast
        } else {
            FieldPolicy::KeepAll
        }
    }

    pub fn is_ignored(&self, field: &str) -> bool {
        self.ignored.contains(field)
    }
}

fn to_set(fields: &[&str]) -> BTreeSet<String> {
    fields.iter().map(|field| field.to_string()).collect()
}

/// What to do with a consolidated field whose changes all cleared the value,
/// leaving nothing to join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyConsolidation {
    /// Report the field with an empty value.
    #[default]
    Emit,
    Suppress,
}

#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub window_hours: u32,
    /// Key or login of the user the digest is for; their own changes are
    /// left out.
    pub excluded_actor: String,
    pub policies: PolicyTable,
    pub empty_consolidation: EmptyConsolidation,
}

impl DigestConfig {
    pub fn new(excluded_actor: impl Into<String>) -> Self {
        Self {
            window_hours: DEFAULT_WINDOW_HOURS,
            excluded_actor: excluded_actor.into(),
            policies: PolicyTable::default(),
            empty_consolidation: EmptyConsolidation::default(),
        }
    }

    pub fn with_window_hours(mut self, hours: u32) -> Self {
        self.window_hours = hours;
        self
    }

    pub fn with_policies(mut self, policies: PolicyTable) -> Self {
        self.policies = policies;
        self
    }

    pub fn with_empty_consolidation(mut self, mode: EmptyConsolidation) -> Self {
        self.empty_consolidation = mode;
        self
    }

    /// Reads `JIRA_DIGEST_USER` and `JIRA_DIGEST_HOURS` from the environment,
    /// after loading a `.env` file if there is one.
    pub fn from_env() -> Result<Self, DigestError> {
        dotenv::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DigestError> {
        let user = lookup("JIRA_DIGEST_USER")
            .filter(|user| !user.trim().is_empty())
            .ok_or_else(|| DigestError::MissingVar("JIRA_DIGEST_USER".to_string()))?;

        let hours = match lookup("JIRA_DIGEST_HOURS") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(hours) => hours,
                Err(_) => {
                    return Err(DigestError::InvalidVar {
                        name: "JIRA_DIGEST_HOURS".to_string(),
                        value,
                    })
                }
            },
            None => DEFAULT_WINDOW_HOURS,
        };

        Ok(Self::new(user.trim()).with_window_hours(hours))
    }
}

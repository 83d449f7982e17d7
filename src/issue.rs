use serde::Serialize;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

pub const ISSUE_CREATED: &str = "Issue Created";
pub const COMMENT: &str = "Comment";

/// Identity of a tracked issue. Two issues are the same iff their keys match;
/// the remaining fields are carried along for the report.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub priority: String,
    pub status: String,
}

impl PartialEq for Issue {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Issue {}

impl Hash for Issue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

// Eq, Ord and Hash all look at the key alone, so maps keyed by `Issue` can be
// queried with a plain key.
impl Borrow<str> for Issue {
    fn borrow(&self) -> &str {
        &self.key
    }
}

/// A Jira user as far as the digest cares: two identifiers that can match
/// the excluded actor and a name to print.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor {
    pub key: Option<String>,
    pub name: Option<String>,
    pub display_name: String,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self {
            key: None,
            name: None,
            display_name: "Anonymous".to_string(),
        }
    }

    pub fn is(&self, identifier: &str) -> bool {
        self.key.as_deref() == Some(identifier) || self.name.as_deref() == Some(identifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTransition {
    pub field: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone)]
pub struct Creation {
    pub at: String,
    pub actor: Actor,
}

#[derive(Debug, Clone)]
pub struct ChangelogEntry {
    pub at: String,
    pub actor: Actor,
    pub transitions: Vec<FieldTransition>,
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub created: String,
    pub updated: String,
    pub actor: Actor,
    pub body: String,
}

/// Everything the engine needs to know about one issue. Timestamps stay as
/// the text the tracker sent; they are parsed during extraction.
#[derive(Debug, Clone)]
pub struct IssueRecord {
    pub issue: Issue,
    pub created: Creation,
    pub changelog: Vec<ChangelogEntry>,
    pub comments: Vec<Comment>,
}

impl IssueRecord {
    /// The issue's three event sources, creation first.
    pub fn events(&self) -> impl Iterator<Item = RawEvent<'_>> {
        std::iter::once(RawEvent::Created(&self.created))
            .chain(self.changelog.iter().map(RawEvent::FieldChange))
            .chain(self.comments.iter().map(RawEvent::Comment))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum RawEvent<'a> {
    Created(&'a Creation),
    FieldChange(&'a ChangelogEntry),
    Comment(&'a Comment),
}

impl<'a> RawEvent<'a> {
    pub fn actor(&self) -> &'a Actor {
        match self {
            RawEvent::Created(creation) => &creation.actor,
            RawEvent::FieldChange(entry) => &entry.actor,
            RawEvent::Comment(comment) => &comment.actor,
        }
    }

    /// Timestamps that can place the event in the window; any one suffices.
    pub fn timestamps(&self) -> Vec<&'a str> {
        match self {
            RawEvent::Created(creation) => vec![creation.at.as_str()],
            RawEvent::FieldChange(entry) => vec![entry.at.as_str()],
            RawEvent::Comment(comment) => vec![comment.created.as_str(), comment.updated.as_str()],
        }
    }
}

/// One line of the digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub field: String,
    pub author: String,
    pub from: String,
    pub to: String,
}

impl SummaryEntry {
    pub fn is_creation(&self) -> bool {
        self.field == ISSUE_CREATED
    }
}

use serde::Deserialize;

use crate::error::DigestError;
use crate::issue::{Actor, ChangelogEntry, Comment, Creation, FieldTransition, Issue, IssueRecord};

#[derive(Deserialize)]
pub struct JiraUser {
    pub key: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

#[derive(Deserialize)]
pub struct IssueListResponse {
    pub issues: Vec<JiraIssue>,
}

#[derive(Deserialize)]
pub struct JiraIssue {
    pub key: String,
    pub fields: JiraIssueFields,
    #[serde(default)]
    pub changelog: Changelog,
}

#[derive(Deserialize)]
pub struct NamedValue {
    pub name: String,
}

#[derive(Deserialize)]
pub struct JiraIssueFields {
    pub summary: String,
    pub created: String,
    #[serde(rename = "issuetype")]
    pub issue_type: NamedValue,
    pub priority: Option<NamedValue>,
    pub status: NamedValue,
    pub reporter: Option<JiraUser>,
    #[serde(default)]
    pub comment: CommentPage,
}

#[derive(Deserialize, Default)]
pub struct Changelog {
    #[serde(default)]
    pub histories: Vec<ChangelogHistory>,
}

#[derive(Deserialize)]
pub struct ChangelogHistory {
    pub created: String,
    pub author: Option<JiraUser>,
    #[serde(default)]
    pub items: Vec<ChangelogItem>,
}

#[derive(Deserialize)]
pub struct ChangelogItem {
    pub field: String,
    #[serde(rename = "fromString")]
    pub from_text: Option<String>,
    #[serde(rename = "toString")]
    pub to_text: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct CommentPage {
    #[serde(default)]
    pub comments: Vec<JiraComment>,
}

#[derive(Deserialize)]
pub struct JiraComment {
    pub author: Option<JiraUser>,
    #[serde(default)]
    pub body: Option<String>,
    pub created: String,
    pub updated: String,
}

/// Decodes the body of a `/rest/api/2/search?expand=changelog` response.
pub fn parse_search_response(body: &str) -> Result<Vec<IssueRecord>, DigestError> {
    let response: IssueListResponse = serde_json::from_str(body)?;
    Ok(response.issues.into_iter().map(IssueRecord::from).collect())
}

impl From<Option<JiraUser>> for Actor {
    fn from(user: Option<JiraUser>) -> Self {
        match user {
            Some(user) => Actor {
                key: user.key,
                name: user.name,
                display_name: user.display_name,
            },
            None => Actor::anonymous(),
        }
    }
}

impl From<JiraIssue> for IssueRecord {
    fn from(jira_issue: JiraIssue) -> Self {
        let fields = jira_issue.fields;
        IssueRecord {
            issue: Issue {
                key: jira_issue.key,
                summary: fields.summary,
                issue_type: fields.issue_type.name,
                priority: fields.priority.map(|p| p.name).unwrap_or_default(),
                status: fields.status.name,
            },
            created: Creation {
                at: fields.created,
                actor: fields.reporter.into(),
            },
            changelog: jira_issue
                .changelog
                .histories
                .into_iter()
                .map(|history| ChangelogEntry {
                    at: history.created,
                    actor: history.author.into(),
                    transitions: history
                        .items
                        .into_iter()
                        .map(|item| FieldTransition {
                            field: item.field,
                            from: item.from_text.unwrap_or_default(),
                            to: item.to_text.unwrap_or_default(),
                        })
                        .collect(),
                })
                .collect(),
            comments: fields
                .comment
                .comments
                .into_iter()
                .map(|comment| Comment {
                    created: comment.created,
                    updated: comment.updated,
                    actor: comment.author.into(),
                    body: comment.body.unwrap_or_default(),
                })
                .collect(),
        }
    }
}

use crate::config::PolicyTable;
use crate::error::DigestError;
use crate::issue::{IssueRecord, RawEvent, SummaryEntry, COMMENT, ISSUE_CREATED};
use crate::text::{title_case, truncate};
use crate::window::TimeWindow;

/// Turns every in-window event of `record` not caused by `excluded_actor`
/// into summary entries, in source order: creation, changelog, comments.
///
/// Changelog transitions on ignored fields are dropped here. The first
/// timestamp that cannot be parsed fails the whole issue.
pub fn extract(
    record: &IssueRecord,
    window: &TimeWindow,
    excluded_actor: &str,
    policies: &PolicyTable,
) -> Result<Vec<SummaryEntry>, DigestError> {
    let key = record.issue.key.as_str();
    let mut entries = Vec::new();

    for event in record.events() {
        if !in_window(&event, window, key)? || event.actor().is(excluded_actor) {
            continue;
        }
        entries.extend(summarize_event(event, policies, key));
    }

    Ok(entries)
}

fn in_window(event: &RawEvent<'_>, window: &TimeWindow, key: &str) -> Result<bool, DigestError> {
    for timestamp in event.timestamps() {
        if window.contains_timestamp(key, timestamp)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn summarize_event(event: RawEvent<'_>, policies: &PolicyTable, key: &str) -> Vec<SummaryEntry> {
    match event {
        RawEvent::Created(creation) => vec![SummaryEntry {
            field: ISSUE_CREATED.to_string(),
            author: creation.actor.display_name.clone(),
            from: String::new(),
            to: String::new(),
        }],
        RawEvent::FieldChange(entry) => entry
            .transitions
            .iter()
            .filter(|transition| {
                let ignored = policies.is_ignored(&transition.field);
                if ignored {
                    tracing::trace!(issue = key, field = %transition.field, "skipping ignored field");
                }
                !ignored
            })
            .map(|transition| SummaryEntry {
                field: title_case(&transition.field),
                author: entry.actor.display_name.clone(),
                from: truncate(&transition.from),
                to: truncate(&transition.to),
            })
            .collect(),
        RawEvent::Comment(comment) => vec![SummaryEntry {
            field: COMMENT.to_string(),
            author: comment.actor.display_name.clone(),
            from: String::new(),
            to: truncate(&comment.body),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{Actor, ChangelogEntry, Comment, Creation, FieldTransition, Issue};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    const ME: &str = "amuller";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap()
    }

    fn hours_ago(hours: i64) -> String {
        (now() - Duration::hours(hours)).to_rfc3339()
    }

    fn user(login: &str) -> Actor {
        Actor {
            key: Some(format!("{login}-key")),
            name: Some(login.to_string()),
            display_name: login.to_uppercase(),
        }
    }

    fn transition(field: &str, from: &str, to: &str) -> FieldTransition {
        FieldTransition {
            field: field.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    fn record(created_hours_ago: i64, creator: Actor) -> IssueRecord {
        IssueRecord {
            issue: Issue {
                key: "HIG-1".to_string(),
                summary: "Query timeouts".to_string(),
                issue_type: "Bug".to_string(),
                priority: "Major".to_string(),
                status: "Open".to_string(),
            },
            created: Creation {
                at: hours_ago(created_hours_ago),
                actor: creator,
            },
            changelog: Vec::new(),
            comments: Vec::new(),
        }
    }

    fn run(record: &IssueRecord) -> Vec<SummaryEntry> {
        let window = TimeWindow::new(now(), 24);
        extract(record, &window, ME, &PolicyTable::default()).unwrap()
    }

    #[test]
    fn recent_creation_is_reported() {
        let entries = run(&record(3, user("dana")));
        assert_eq!(
            entries,
            vec![SummaryEntry {
                field: ISSUE_CREATED.to_string(),
                author: "DANA".to_string(),
                from: String::new(),
                to: String::new(),
            }]
        );
    }

    #[test]
    fn old_creation_is_skipped() {
        assert!(run(&record(25, user("dana"))).is_empty());
    }

    #[test]
    fn own_activity_is_skipped_by_key_or_name() {
        let by_name = Actor {
            key: Some("someone-else".to_string()),
            name: Some(ME.to_string()),
            display_name: "Me".to_string(),
        };
        let by_key = Actor {
            key: Some(ME.to_string()),
            name: None,
            display_name: "Me".to_string(),
        };
        assert!(run(&record(1, by_name)).is_empty());
        assert!(run(&record(1, by_key)).is_empty());
    }

    #[test]
    fn changelog_transitions_become_entries() {
        let mut issue = record(48, user("dana"));
        issue.changelog.push(ChangelogEntry {
            at: hours_ago(2),
            actor: user("lee"),
            transitions: vec![
                transition("status", "Open", "In Progress"),
                transition("Rank", "", "Ranked higher"),
                transition("assignee", "", "Lee"),
            ],
        });
        issue.changelog.push(ChangelogEntry {
            at: hours_ago(30),
            actor: user("lee"),
            transitions: vec![transition("priority", "Minor", "Major")],
        });

        let entries = run(&issue);
        let fields: Vec<&str> = entries.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["Status", "Assignee"]);
        assert_eq!(entries[0].author, "LEE");
        assert_eq!(entries[0].from, "Open");
        assert_eq!(entries[0].to, "In Progress");
    }

    #[test]
    fn changelog_values_are_truncated() {
        let mut issue = record(48, user("dana"));
        let long = "d".repeat(200);
        issue.changelog.push(ChangelogEntry {
            at: hours_ago(1),
            actor: user("lee"),
            transitions: vec![transition("description", &long, "")],
        });

        let entries = run(&issue);
        assert_eq!(entries[0].from.chars().count(), 143);
        assert_eq!(entries[0].to, "");
    }

    #[test]
    fn comment_counts_when_created_or_updated_in_window() {
        let mut issue = record(48, user("dana"));
        issue.comments.push(Comment {
            created: hours_ago(100),
            updated: hours_ago(1),
            actor: user("lee"),
            body: "Edited after the fact".to_string(),
        });
        issue.comments.push(Comment {
            created: hours_ago(100),
            updated: hours_ago(99),
            actor: user("lee"),
            body: "Stale".to_string(),
        });
        issue.comments.push(Comment {
            created: hours_ago(1),
            updated: hours_ago(1),
            actor: user(ME),
            body: "My own note".to_string(),
        });

        let entries = run(&issue);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].field, COMMENT);
        assert_eq!(entries[0].to, "Edited after the fact");
        assert_eq!(entries[0].from, "");
    }

    #[test]
    fn malformed_timestamp_fails_the_issue() {
        let mut issue = record(1, user("dana"));
        issue.comments.push(Comment {
            created: "not a date".to_string(),
            updated: hours_ago(1),
            actor: user("lee"),
            body: "Hi".to_string(),
        });

        let window = TimeWindow::new(now(), 24);
        let err = extract(&issue, &window, ME, &PolicyTable::default()).unwrap_err();
        assert!(matches!(err, DigestError::InvalidTimestamp { issue, .. } if issue == "HIG-1"));
    }
}

use serde::{Serialize, Serializer};
use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::issue::{Issue, SummaryEntry};

/// The finished digest: issues in key order, each with at least one entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Digest {
    issues: BTreeMap<Issue, Vec<SummaryEntry>>,
}

#[derive(Serialize)]
struct IssueEntries<'a> {
    issue: &'a Issue,
    entries: &'a [SummaryEntry],
}

// Issues are not string-like, so the map goes out as an ordered list.
impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.issues.iter().map(|(issue, entries)| IssueEntries {
            issue,
            entries,
        }))
    }
}

impl Digest {
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&[SummaryEntry]> {
        self.issues.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.issues.keys().map(|issue| issue.key.as_str())
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Issue, Vec<SummaryEntry>> {
        self.issues.iter()
    }

    pub fn entry_count(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }
}

impl<'a> IntoIterator for &'a Digest {
    type Item = (&'a Issue, &'a Vec<SummaryEntry>);
    type IntoIter = btree_map::Iter<'a, Issue, Vec<SummaryEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

impl IntoIterator for Digest {
    type Item = (Issue, Vec<SummaryEntry>);
    type IntoIter = btree_map::IntoIter<Issue, Vec<SummaryEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

/// Builds the digest from per-issue results, dropping issues left without
/// entries. An issue seen twice keeps the entries of its last occurrence.
pub fn collate(results: impl IntoIterator<Item = (Issue, Vec<SummaryEntry>)>) -> Digest {
    let mut issues: BTreeMap<Issue, Vec<SummaryEntry>> = results.into_iter().collect();
    issues.retain(|_, entries| !entries.is_empty());
    Digest { issues }
}

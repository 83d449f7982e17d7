use itertools::Itertools;

use crate::config::{EmptyConsolidation, FieldPolicy, PolicyTable};
use crate::issue::SummaryEntry;

/// Orders one issue's raw entries and applies the per-field policies.
///
/// Entries are stably sorted by field label so that every field forms one
/// contiguous run; each run is then kept, merged or cut to its last entry.
/// The creation entry, if any, always comes first.
pub fn consolidate(
    mut entries: Vec<SummaryEntry>,
    policies: &PolicyTable,
    empty_consolidation: EmptyConsolidation,
) -> Vec<SummaryEntry> {
    entries.sort_by(|a, b| a.field.cmp(&b.field));

    let (created, changes): (Vec<_>, Vec<_>) =
        entries.into_iter().partition(SummaryEntry::is_creation);

    let mut consolidated = created;
    let runs = changes.into_iter().chunk_by(|entry| entry.field.clone());
    for (field, run) in &runs {
        let run: Vec<SummaryEntry> = run.collect();
        match policies.policy_for(&field) {
            // The ignore set applies to raw field names and was handled during
            // extraction; a label that title-cases into it is an ordinary field.
            FieldPolicy::Ignore | FieldPolicy::KeepAll => consolidated.extend(run),
            FieldPolicy::TruncateToLast => consolidated.extend(run.into_iter().last()),
            FieldPolicy::Consolidate => {
                consolidated.extend(merge_run(field, run, empty_consolidation));
            }
        }
    }
    consolidated
}

fn merge_run(
    field: String,
    run: Vec<SummaryEntry>,
    empty_consolidation: EmptyConsolidation,
) -> Option<SummaryEntry> {
    let values: Vec<&str> = run
        .iter()
        .map(|entry| entry.to.as_str())
        .filter(|to| !to.is_empty())
        .collect();
    if values.is_empty() && empty_consolidation == EmptyConsolidation::Suppress {
        return None;
    }

    let to = values.join(", ");
    run.last().map(|last| SummaryEntry {
        field,
        author: last.author.clone(),
        from: String::new(),
        to,
    })
}

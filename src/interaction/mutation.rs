use crate::core::TimelineRecord;

use super::edit::RenameMutation;
use super::gesture::DateMutation;

pub const UNTITLED_LABEL: &str = "Untitled item";

/// Label shown for a record, substituting the placeholder for blank names.
#[must_use]
pub fn display_name(record: &TimelineRecord) -> &str {
    let trimmed = record.trimmed_name();
    if trimmed.is_empty() {
        UNTITLED_LABEL
    } else {
        trimmed
    }
}

/// Applies new dates to the record with a matching id.
///
/// Returns the updated set, or `None` when no record changed.
#[must_use]
pub fn apply_date_mutation(
    records: &[TimelineRecord],
    mutation: &DateMutation,
) -> Option<Vec<TimelineRecord>> {
    let start = mutation.start.format_token();
    let end = mutation.end.format_token();
    update_matching(records, |record| {
        if record.id.as_ref() != Some(&mutation.id) {
            return None;
        }
        if record.start.as_deref() == Some(start.as_str())
            && record.end.as_deref() == Some(end.as_str())
        {
            return None;
        }
        Some(TimelineRecord {
            start: Some(start.clone()),
            end: Some(end.clone()),
            ..record.clone()
        })
    })
}

/// Renames the record with a matching id.
///
/// The name is trimmed; a blank name becomes [`UNTITLED_LABEL`]. Returns
/// `None` when no record changed.
#[must_use]
pub fn apply_rename(
    records: &[TimelineRecord],
    rename: &RenameMutation,
) -> Option<Vec<TimelineRecord>> {
    let trimmed = rename.name.trim();
    let next_name = if trimmed.is_empty() {
        UNTITLED_LABEL
    } else {
        trimmed
    };
    update_matching(records, |record| {
        if record.id.as_ref() != Some(&rename.id) || record.name.as_deref() == Some(next_name) {
            return None;
        }
        Some(TimelineRecord {
            name: Some(next_name.to_owned()),
            ..record.clone()
        })
    })
}

fn update_matching<F>(records: &[TimelineRecord], mut update: F) -> Option<Vec<TimelineRecord>>
where
    F: FnMut(&TimelineRecord) -> Option<TimelineRecord>,
{
    let mut changed = false;
    let next = records
        .iter()
        .map(|record| match update(record) {
            Some(updated) => {
                changed = true;
                updated
            }
            None => record.clone(),
        })
        .collect();
    changed.then_some(next)
}

use std::cmp::Ordering;

use super::model::LayoutEntry;

/// Total order used before packing: start, end, name, then id.
///
/// Missing names compare as empty strings. Records with an id precede
/// anonymous ones; anonymous records fall back to their resolved key.
pub(crate) fn compare_entries(a: &LayoutEntry<'_>, b: &LayoutEntry<'_>) -> Ordering {
    a.start_date
        .cmp(&b.start_date)
        .then_with(|| a.end_date.cmp(&b.end_date))
        .then_with(|| {
            let a_name = a.record.name.as_deref().unwrap_or_default();
            let b_name = b.record.name.as_deref().unwrap_or_default();
            a_name.cmp(b_name)
        })
        .then_with(|| match (&a.record.id, &b.record.id) {
            (Some(a_id), Some(b_id)) => a_id.cmp(b_id),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.item_id.cmp(&b.item_id),
        })
}

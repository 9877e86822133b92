use crate::state::{AppRecord, ListView, ViewQuery};

/// What: Derive one page of the list for the rendering layer.
///
/// Inputs:
/// - `apps`: Canonical working list, ordered A to Z
/// - `query`: Filter text, sort, page offset and page size
///
/// Output:
/// - `ListView { items: None, total: 0 }` when `apps` is empty; otherwise the
///   page of matching records and the number of matches.
///
/// Details:
/// - Ordering and filtering work on borrowed copies; `apps` is never reordered.
/// - An offset at or past the match count restarts at the first page.
/// - The page never holds more than `items_per_page` records.
#[must_use]
pub fn derive_view(apps: &[AppRecord], query: &ViewQuery) -> ListView {
    if apps.is_empty() {
        return ListView::default();
    }
    let ordered = super::sort::ordered(apps, query.sort.direction);
    let filtered = super::filter::filter_by_name(ordered, &query.filter_text);
    let total = filtered.len();
    let start = page_start(query.page_offset, total);
    let items: Vec<AppRecord> = filtered
        .into_iter()
        .skip(start)
        .take(query.items_per_page)
        .cloned()
        .collect();
    ListView {
        items: Some(items),
        total,
    }
}

/// Effective page start: the requested offset, or 0 when it is out of range.
pub(crate) const fn page_start(offset: usize, total: usize) -> usize {
    if offset >= total { 0 } else { offset }
}

use crate::state::AppRecord;

/// What: Keep only records whose name contains `text`, ignoring case.
///
/// Inputs:
/// - `apps`: Records in display order
/// - `text`: Filter text; empty keeps everything
///
/// Output:
/// - Matching records, in input order.
#[must_use]
pub fn filter_by_name<'a>(apps: Vec<&'a AppRecord>, text: &str) -> Vec<&'a AppRecord> {
    if text.is_empty() {
        return apps;
    }
    let needle = text.to_lowercase();
    apps.into_iter()
        .filter(|a| a.name.to_lowercase().contains(&needle))
        .collect()
}

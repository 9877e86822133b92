use crate::state::{AppRecord, SortDirection};

/// What: Sort records ascending by case-insensitive name, in place.
///
/// Inputs:
/// - `apps`: Records to reorder
///
/// Output:
/// - `apps` ordered A to Z.
///
/// Details:
/// - The sort is stable: records whose lowercased names are equal keep their
///   relative input order.
pub fn sort_by_name(apps: &mut [AppRecord]) {
    apps.sort_by_cached_key(AppRecord::sort_key);
}

/// What: Position at which `name` belongs in an A to Z ordered slice.
///
/// Inputs:
/// - `apps`: Records already ordered by [`sort_by_name`]
/// - `name`: Display name of the record to place
///
/// Output:
/// - Index after every record whose lowercased name is `<=` the lowercased `name`.
#[must_use]
pub fn insertion_index(apps: &[AppRecord], name: &str) -> usize {
    let key = name.to_lowercase();
    apps.partition_point(|a| a.sort_key() <= key)
}

/// What: Borrow records in the requested direction without touching the source order.
///
/// Inputs:
/// - `apps`: Canonical A to Z ordered records
/// - `direction`: Requested direction
///
/// Output:
/// - Fresh vector of references; `Desc` is the canonical order reversed.
#[must_use]
pub fn ordered(apps: &[AppRecord], direction: SortDirection) -> Vec<&AppRecord> {
    match direction {
        SortDirection::Asc => apps.iter().collect(),
        SortDirection::Desc => apps.iter().rev().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MarketplaceApp;

    fn rec(id: &str, name: &str) -> AppRecord {
        AppRecord::from_marketplace(MarketplaceApp {
            id: id.into(),
            name: name.into(),
            version: "1.0".into(),
            extra: serde_json::Map::new(),
        })
    }

    fn names(apps: &[AppRecord]) -> Vec<&str> {
        apps.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    /// What: Name sort ignores case
    ///
    /// - Input: Mixed-case names out of order
    /// - Output: Alphabetical order regardless of case
    fn sort_by_name_is_case_insensitive() {
        let mut apps = vec![rec("1", "beta"), rec("2", "Alpha"), rec("3", "gamma"), rec("4", "Delta")];
        sort_by_name(&mut apps);
        assert_eq!(names(&apps), vec!["Alpha", "beta", "Delta", "gamma"]);
    }

    #[test]
    /// What: Names equal up to case keep their input order
    ///
    /// - Input: "Chat" and "chat" with different ids, plus an earlier name
    /// - Output: Both ties present after "Bot", in input order
    fn sort_by_name_keeps_ties_in_input_order() {
        let mut apps = vec![rec("x", "chat"), rec("y", "Bot"), rec("z", "Chat")];
        sort_by_name(&mut apps);
        let ids: Vec<&str> = apps.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["y", "x", "z"]);
    }

    #[test]
    /// What: Insertion index lands between neighbours and after ties
    ///
    /// - Input: Ordered ["Alpha", "Gamma"]; names "beta", "alpha", "zulu"
    /// - Output: 1, 1, 2
    fn insertion_index_between_and_after_ties() {
        let apps = vec![rec("1", "Alpha"), rec("2", "Gamma")];
        assert_eq!(insertion_index(&apps, "beta"), 1);
        assert_eq!(insertion_index(&apps, "alpha"), 1);
        assert_eq!(insertion_index(&apps, "zulu"), 2);
        assert_eq!(insertion_index(&[], "any"), 0);
    }

    #[test]
    /// What: Descending view reverses without mutating the source
    ///
    /// - Input: Ordered ["A", "B", "C"], direction Desc
    /// - Output: View is C, B, A; source still A, B, C
    fn ordered_desc_leaves_source_untouched() {
        let apps = vec![rec("1", "A"), rec("2", "B"), rec("3", "C")];
        let view: Vec<&str> = ordered(&apps, SortDirection::Desc)
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(view, vec!["C", "B", "A"]);
        assert_eq!(names(&apps), vec!["A", "B", "C"]);
    }
}

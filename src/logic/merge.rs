use std::collections::{HashMap, HashSet};

use crate::state::{AppRecord, InstalledApp, MarketplaceApp};

/// What: Join the marketplace catalog with the installed apps on `id`.
///
/// Inputs:
/// - `marketplace`: Catalog entries, any order
/// - `installed`: Installed app summaries, any order
///
/// Output:
/// - One record per catalog id, ordered A to Z by case-insensitive name.
///
/// Details:
/// - Installed entries take over `status` and `version`; `marketplace_version`
///   always comes from the catalog.
/// - Installed apps missing from the catalog are not listed.
/// - A repeated catalog id keeps its first occurrence only.
#[must_use]
pub fn merge_catalog(
    marketplace: Vec<MarketplaceApp>,
    installed: Vec<InstalledApp>,
) -> Vec<AppRecord> {
    let mut installed_by_id: HashMap<String, InstalledApp> =
        installed.into_iter().map(|a| (a.id.clone(), a)).collect();
    let mut seen: HashSet<String> = HashSet::with_capacity(marketplace.len());
    let mut out: Vec<AppRecord> = Vec::with_capacity(marketplace.len());
    for app in marketplace {
        if !seen.insert(app.id.clone()) {
            tracing::debug!(app_id = %app.id, "duplicate catalog entry skipped");
            continue;
        }
        let rec = match installed_by_id.remove(&app.id) {
            Some(inst) => AppRecord::installed(app, inst.status, inst.version),
            None => AppRecord::from_marketplace(app),
        };
        out.push(rec);
    }
    if !installed_by_id.is_empty() {
        tracing::debug!(
            count = installed_by_id.len(),
            "installed apps without a catalog entry left out"
        );
    }
    super::sort::sort_by_name(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(id: &str, name: &str, version: &str) -> MarketplaceApp {
        MarketplaceApp {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            extra: serde_json::Map::new(),
        }
    }

    fn inst(id: &str, status: &str, version: &str) -> InstalledApp {
        InstalledApp {
            id: id.into(),
            status: status.into(),
            version: version.into(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    /// What: Single uninstalled catalog entry merges to the bare shape
    ///
    /// - Input: Catalog [Zeta 1.0]; no installed apps
    /// - Output: One record, not installed, both versions "1.0"
    fn merge_uninstalled_entry() {
        let out = merge_catalog(vec![market("1", "Zeta", "1.0")], Vec::new());
        assert_eq!(out.len(), 1);
        let r = &out[0];
        assert_eq!(r.id, "1");
        assert_eq!(r.version, "1.0");
        assert_eq!(r.marketplace_version, "1.0");
        assert_eq!(r.installed, None);
        assert_eq!(r.status, None);
    }

    #[test]
    /// What: Installed entry overrides status and version, sorted by name
    ///
    /// - Input: Catalog [B 2.1, A 1.0]; installed [B running 2.0]
    /// - Output: A (not installed) then B (installed, running, version 2.0, marketplace 2.1)
    fn merge_installed_entry_and_sort() {
        let out = merge_catalog(
            vec![market("2", "B", "2.1"), market("1", "A", "1.0")],
            vec![inst("2", "running", "2.0")],
        );
        assert_eq!(out[0].name, "A");
        assert_eq!(out[0].installed, None);
        assert_eq!(out[1].name, "B");
        assert_eq!(out[1].installed, Some(true));
        assert_eq!(out[1].status.as_deref(), Some("running"));
        assert_eq!(out[1].version, "2.0");
        assert_eq!(out[1].marketplace_version, "2.1");
    }

    #[test]
    /// What: Install flag and status are always present together
    ///
    /// - Input: Mixed catalog with some installed
    /// - Output: For every record, installed.is_some() == status.is_some()
    fn merge_install_fields_consistent() {
        let out = merge_catalog(
            vec![
                market("1", "a", "1"),
                market("2", "b", "1"),
                market("3", "c", "1"),
            ],
            vec![inst("3", "disabled", "0.9"), inst("9", "enabled", "1")],
        );
        assert_eq!(out.len(), 3);
        assert!(out
            .iter()
            .all(|r| r.installed.is_some() == r.status.is_some()));
    }

    #[test]
    /// What: Duplicate catalog ids collapse to the first entry
    ///
    /// - Input: Two catalog entries with id "1"
    /// - Output: One record named after the first
    fn merge_duplicate_ids_keep_first() {
        let out = merge_catalog(
            vec![market("1", "First", "1"), market("1", "Second", "2")],
            Vec::new(),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "First");
    }

    #[test]
    /// What: Catalog entries carrying install-looking fields do not override merged state
    ///
    /// - Input: Catalog entry with `status`/`installed`; no matching installed app
    /// - Output: Record JSON has neither key; install fields stay consistent
    fn merge_ignores_catalog_install_fields() {
        let entry: MarketplaceApp = serde_json::from_value(serde_json::json!({
            "id": "1",
            "name": "Zeta",
            "version": "1.0",
            "status": "initialized",
            "installed": true
        }))
        .expect("valid catalog entry");
        let out = merge_catalog(vec![entry], Vec::new());
        let v = serde_json::to_value(&out[0]).expect("serializable");
        assert!(v.get("status").is_none());
        assert!(v.get("installed").is_none());
        assert_eq!(out[0].installed.is_some(), out[0].status.is_some());
    }
}

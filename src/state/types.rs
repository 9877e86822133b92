//! Core value types used by the marketplace list state.

use serde_json::{Map, Value};

/// Marketplace catalog entry as returned by the catalog listing.
///
/// Fields other than `id`, `name` and `version` (description, author, price,
/// ...) are kept verbatim in `extra` so they survive the merge.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MarketplaceApp {
    /// Opaque unique app identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Version published in the marketplace.
    pub version: String,
    /// Remaining catalog fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Locally installed app summary.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InstalledApp {
    /// Opaque unique app identifier.
    pub id: String,
    /// Installation/runtime status token (e.g. `manually_enabled`).
    pub status: String,
    /// Installed version.
    pub version: String,
    /// Remaining fields reported by the server.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Status and version of one installed app, as returned by the single-app lookup.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AppStatusInfo {
    /// Installation/runtime status token.
    pub status: String,
    /// Installed version.
    pub version: String,
}

/// One merged marketplace application, as shown in the list.
///
/// `installed` and `status` are set and cleared together. After a removal,
/// `version` falls back to `marketplace_version`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord {
    /// Opaque unique app identifier.
    pub id: String,
    /// Display name; compared case-insensitively.
    pub name: String,
    /// Installed version when installed, marketplace version otherwise.
    pub version: String,
    /// Version published in the marketplace at fetch time.
    pub marketplace_version: String,
    /// Presence flag; `None` means not installed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed: Option<bool>,
    /// Status token, meaningful only while installed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Catalog fields carried over from the marketplace entry.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AppRecord {
    /// What: Build a record for a catalog entry that is not installed.
    ///
    /// Inputs:
    /// - `app`: Marketplace catalog entry
    ///
    /// Output:
    /// - Record with `installed`/`status` absent and both versions equal to the catalog version.
    #[must_use]
    pub fn from_marketplace(app: MarketplaceApp) -> Self {
        Self {
            marketplace_version: app.version.clone(),
            id: app.id,
            name: app.name,
            version: app.version,
            installed: None,
            status: None,
            extra: without_install_keys(app.extra),
        }
    }

    /// What: Build a record for a catalog entry that is installed.
    ///
    /// Inputs:
    /// - `app`: Marketplace catalog entry (or detail at the installed version)
    /// - `status`: Installed status token
    /// - `version`: Installed version
    ///
    /// Output:
    /// - Record flagged installed, `marketplace_version` taken from `app.version`.
    #[must_use]
    pub fn installed(app: MarketplaceApp, status: String, version: String) -> Self {
        Self {
            marketplace_version: app.version,
            id: app.id,
            name: app.name,
            version,
            installed: Some(true),
            status: Some(status),
            extra: without_install_keys(app.extra),
        }
    }

    /// Whether the record is currently flagged installed.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.installed.unwrap_or(false)
    }

    /// Lowercased name used for ordering and filtering.
    pub(crate) fn sort_key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Wire keys owned by [`AppRecord`] itself; catalog copies of them would
/// serialize next to (or instead of) the merged install state.
const RECORD_KEYS: [&str; 3] = ["installed", "status", "marketplaceVersion"];

/// Drop catalog fields that the merged record sets on its own.
fn without_install_keys(mut extra: Map<String, Value>) -> Map<String, Value> {
    for key in RECORD_KEYS {
        extra.remove(key);
    }
    extra
}

/// Field the list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Case-insensitive display name.
    #[default]
    Name,
}

/// Direction of the list ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// A to Z.
    #[default]
    Asc,
    /// Z to A.
    Desc,
}

impl SortDirection {
    /// Return the string key used in settings files for this direction.
    ///
    /// Inputs: none
    ///
    /// Output: Static config key string.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse a direction from its settings key or aliases.
    ///
    /// Inputs: `s` config string (case-insensitive).
    ///
    /// Output: `Some(SortDirection)` on recognized value; `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" | "a-z" => Some(Self::Asc),
            "desc" | "descending" | "z-a" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Field plus direction, as chosen in the list header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    /// Ordering field.
    pub field: SortField,
    /// Ordering direction.
    pub direction: SortDirection,
}

/// Inputs of the derived list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery {
    /// Name substring filter; empty means no filtering.
    pub filter_text: String,
    /// Requested ordering.
    pub sort: SortSpec,
    /// Index of the first item of the requested page.
    pub page_offset: usize,
    /// Page size.
    pub items_per_page: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            filter_text: String::new(),
            sort: SortSpec::default(),
            page_offset: 0,
            items_per_page: 25,
        }
    }
}

/// One page of the filtered list plus the filtered total.
///
/// `items` is `None` while the working set is empty (nothing loaded yet).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListView {
    /// Records on the requested page.
    pub items: Option<Vec<AppRecord>>,
    /// Number of records matching the filter, across all pages.
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: SortDirection config key mapping and alias handling
    ///
    /// - Input: Known keys and aliases; unknown key
    /// - Output: Correct mapping to enum variants; None for unknown
    fn state_sort_direction_config_keys_and_aliases() {
        assert_eq!(SortDirection::Asc.as_config_key(), "asc");
        assert_eq!(SortDirection::Desc.as_config_key(), "desc");
        assert_eq!(
            SortDirection::from_config_key(" Descending "),
            Some(SortDirection::Desc)
        );
        assert_eq!(SortDirection::from_config_key("a-z"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::from_config_key("sideways"), None);
    }

    #[test]
    /// What: Record JSON shape uses camelCase and omits absent install fields
    ///
    /// - Input: Not-installed record built from a catalog entry carrying an extra field
    /// - Output: `marketplaceVersion` present, `installed`/`status` absent, extra field kept
    fn state_record_serializes_without_install_fields() {
        let app: MarketplaceApp = serde_json::from_value(serde_json::json!({
            "id": "1",
            "name": "Zeta",
            "version": "1.0",
            "author": "acme"
        }))
        .expect("valid catalog entry");
        let rec = AppRecord::from_marketplace(app);
        let v = serde_json::to_value(&rec).expect("serializable");
        assert_eq!(v["marketplaceVersion"], "1.0");
        assert_eq!(v["author"], "acme");
        assert!(v.get("installed").is_none());
        assert!(v.get("status").is_none());
        assert!(!rec.is_installed());
    }

    #[test]
    /// What: Catalog copies of install fields never reach the merged record
    ///
    /// - Input: Catalog entry carrying `status`, `installed` and `marketplaceVersion`
    /// - Output: Uninstalled record omits them; installed record has one `status`, the merged one
    fn state_record_drops_catalog_install_keys() {
        let entry = || -> MarketplaceApp {
            serde_json::from_value(serde_json::json!({
                "id": "1",
                "name": "Zeta",
                "version": "1.0",
                "status": "initialized",
                "installed": true,
                "marketplaceVersion": "0.1",
                "author": "acme"
            }))
            .expect("valid catalog entry")
        };
        let plain = AppRecord::from_marketplace(entry());
        let text = serde_json::to_string(&plain).expect("serializable");
        assert!(!text.contains("status"));
        assert!(!text.contains("installed"));
        assert_eq!(text.matches("marketplaceVersion").count(), 1);
        let v: Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(v["marketplaceVersion"], "1.0");
        assert_eq!(v["author"], "acme");

        let inst = AppRecord::installed(entry(), "enabled".into(), "0.9".into());
        let text = serde_json::to_string(&inst).expect("serializable");
        assert_eq!(text.matches("\"status\"").count(), 1);
        assert_eq!(text.matches("\"installed\"").count(), 1);
        let v: Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(v["status"], "enabled");
        assert_eq!(v["installed"], true);
    }
}

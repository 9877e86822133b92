//! State transitions applied to the working list of app records.
//!
//! Every live notification ends up as one [`AppUpdate`]; [`apply_update`] is
//! the only place the working list changes after the initial load.

use crate::state::AppRecord;

/// A change to the working list.
#[derive(Clone, Debug, PartialEq)]
pub enum AppUpdate {
    /// An app was installed or updated; carries the freshly merged record.
    Upsert(AppRecord),
    /// An app was uninstalled.
    Removed {
        /// Identifier of the uninstalled app.
        app_id: String,
    },
    /// An installed app changed status.
    StatusChanged {
        /// Identifier of the app.
        app_id: String,
        /// New status token.
        status: String,
    },
}

/// What: Apply one update to the working list.
///
/// Inputs:
/// - `apps`: Working list, ordered A to Z
/// - `update`: Change to apply
///
/// Output:
/// - `true` when the list changed; `false` when the update was a no-op.
///
/// Details:
/// - `Upsert` replaces the record with the same id in place. A renamed record
///   and an unknown id are (re)inserted at their name position so the list
///   stays ordered. An identical record is a no-op.
/// - `Removed` clears `installed`/`status` and resets `version` to
///   `marketplace_version`; unknown ids are ignored.
/// - `StatusChanged` sets `status` only; unknown ids are ignored.
pub fn apply_update(apps: &mut Vec<AppRecord>, update: AppUpdate) -> bool {
    match update {
        AppUpdate::Upsert(rec) => {
            if let Some(pos) = apps.iter().position(|a| a.id == rec.id) {
                if apps[pos] == rec {
                    return false;
                }
                if apps[pos].sort_key() == rec.sort_key() {
                    apps[pos] = rec;
                } else {
                    apps.remove(pos);
                    let idx = super::sort::insertion_index(apps, &rec.name);
                    apps.insert(idx, rec);
                }
            } else {
                tracing::debug!(app_id = %rec.id, "upsert for unlisted app; inserting");
                let idx = super::sort::insertion_index(apps, &rec.name);
                apps.insert(idx, rec);
            }
            true
        }
        AppUpdate::Removed { app_id } => {
            let Some(app) = apps.iter_mut().find(|a| a.id == app_id) else {
                return false;
            };
            if app.installed.is_none() && app.status.is_none() && app.version == app.marketplace_version
            {
                return false;
            }
            app.installed = None;
            app.status = None;
            app.version.clone_from(&app.marketplace_version);
            true
        }
        AppUpdate::StatusChanged { app_id, status } => {
            let Some(app) = apps.iter_mut().find(|a| a.id == app_id) else {
                return false;
            };
            if app.status.as_deref() == Some(status.as_str()) {
                return false;
            }
            app.status = Some(status);
            true
        }
    }
}

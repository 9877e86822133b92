//! Marketplace and installed-app data retrieval.
//!
//! [`AppsApi`] is the seam the list controller fetches through; [`HttpAppsApi`]
//! is the REST-backed implementation used by the binary.

use std::future::Future;

use crate::state::{AppStatusInfo, InstalledApp, MarketplaceApp};

mod marketplace;

pub use marketplace::HttpAppsApi;

/// Crate-wide fallible result; every collaborator failure is reported the same way.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Remote operations the marketplace list depends on.
pub trait AppsApi {
    /// Fetch the full marketplace catalog.
    fn get_apps_from_marketplace(&self) -> impl Future<Output = Result<Vec<MarketplaceApp>>> + Send;

    /// Fetch the apps installed locally.
    fn get_apps(&self) -> impl Future<Output = Result<Vec<InstalledApp>>> + Send;

    /// Fetch status and installed version of one app.
    fn get_app(&self, app_id: &str) -> impl Future<Output = Result<AppStatusInfo>> + Send;

    /// Fetch the marketplace detail of one app at a given version.
    fn get_app_from_marketplace(
        &self,
        app_id: &str,
        version: &str,
    ) -> impl Future<Output = Result<MarketplaceApp>> + Send;
}

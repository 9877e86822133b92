use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use super::{AppsApi, Result};
use crate::config::Settings;
use crate::state::{AppStatusInfo, InstalledApp, MarketplaceApp};
use crate::util::{list_of, object_of, percent_encode};

/// REST client for the server's apps endpoints.
#[derive(Clone, Debug)]
pub struct HttpAppsApi {
    /// Pooled HTTP client carrying auth headers and timeouts.
    client: reqwest::Client,
    /// API base URL ending in `/`.
    base_url: String,
}

impl HttpAppsApi {
    /// What: Build a client from user settings.
    ///
    /// Inputs:
    /// - `settings`: Base URL, optional credentials and request timeout
    ///
    /// Output:
    /// - `Ok(HttpAppsApi)`; `Err` when a credential is not a valid header value
    ///   or the client cannot be built.
    ///
    /// # Errors
    /// - Returns `Err` for header values with control characters
    /// - Returns `Err` when the TLS backend fails to initialize
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(uid) = settings.user_id.as_deref() {
            headers.insert(HeaderName::from_static("x-user-id"), HeaderValue::from_str(uid)?);
        }
        if let Some(token) = settings.auth_token.as_deref() {
            let mut v = HeaderValue::from_str(token)?;
            v.set_sensitive(true);
            headers.insert(HeaderName::from_static("x-auth-token"), v);
        }
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(settings.request_timeout_secs.max(1)))
            .user_agent(format!("appmarket/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            base_url: crate::config::normalize_base_url(&settings.base_url),
        })
    }

    /// Absolute URL for an endpoint path relative to the API base.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// What: GET an endpoint and decode its JSON body.
    ///
    /// Inputs:
    /// - `path`: Endpoint path plus already-encoded query string
    ///
    /// Output:
    /// - Parsed body; `Err` on transport failure, non-success status or invalid JSON.
    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(format!("GET {path} failed: HTTP {status}").into());
        }
        Ok(resp.json::<Value>().await?)
    }
}

impl AppsApi for HttpAppsApi {
    async fn get_apps_from_marketplace(&self) -> Result<Vec<MarketplaceApp>> {
        let body = self.get_json("apps?marketplace=true").await?;
        let items = list_of(body, "apps").ok_or("marketplace listing is not a list")?;
        let apps = decode_each::<MarketplaceApp>(items, "marketplace");
        tracing::info!(count = apps.len(), "fetched marketplace catalog");
        Ok(apps)
    }

    async fn get_apps(&self) -> Result<Vec<InstalledApp>> {
        let body = self.get_json("apps").await?;
        let items = list_of(body, "apps").ok_or("installed apps listing is not a list")?;
        let apps = decode_each::<InstalledApp>(items, "installed");
        tracing::info!(count = apps.len(), "fetched installed apps");
        Ok(apps)
    }

    async fn get_app(&self, app_id: &str) -> Result<AppStatusInfo> {
        let body = self.get_json(&format!("apps/{}", percent_encode(app_id))).await?;
        let app = object_of(body, "app").ok_or_else(|| format!("app {app_id} not found"))?;
        Ok(serde_json::from_value(app)?)
    }

    async fn get_app_from_marketplace(&self, app_id: &str, version: &str) -> Result<MarketplaceApp> {
        let body = self
            .get_json(&format!(
                "apps/{}?marketplace=true&version={}",
                percent_encode(app_id),
                percent_encode(version)
            ))
            .await?;
        let app = object_of(body, "app")
            .ok_or_else(|| format!("marketplace app {app_id}@{version} not found"))?;
        Ok(serde_json::from_value(app)?)
    }
}

/// Decode each list element, skipping (and logging) entries that do not fit `T`.
fn decode_each<T: serde::de::DeserializeOwned>(items: Vec<Value>, what: &str) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|v| match serde_json::from_value::<T>(v) {
            Ok(t) => Some(t),
            Err(e) => {
                tracing::warn!(listing = what, error = %e, "skipping malformed entry");
                None
            }
        })
        .collect()
}

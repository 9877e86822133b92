use std::fs;

use crate::state::SortDirection;

use super::paths::resolve_settings_config_path;

/// User-tunable settings read from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the server REST API, ending in `/`.
    pub base_url: String,
    /// Value for the `X-User-Id` header, if authenticating.
    pub user_id: Option<String>,
    /// Value for the `X-Auth-Token` header, if authenticating.
    pub auth_token: Option<String>,
    /// Default page size of the list.
    pub items_per_page: usize,
    /// Default ordering direction.
    pub sort_direction: SortDirection,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api/".to_string(),
            user_id: None,
            auth_token: None,
            items_per_page: 25,
            sort_direction: SortDirection::Asc,
            request_timeout_secs: 30,
        }
    }
}

/// Load user settings from the resolved `settings.conf`.
/// Falls back to `Settings::default()` when missing or unreadable.
#[must_use]
pub fn settings() -> Settings {
    let Some(p) = resolve_settings_config_path() else {
        tracing::debug!("no settings.conf found; using defaults");
        return Settings::default();
    };
    match fs::read_to_string(&p) {
        Ok(content) => {
            tracing::debug!(path = %p.display(), "loaded settings");
            parse_settings(&content)
        }
        Err(e) => {
            tracing::warn!(path = %p.display(), error = %e, "failed to read settings; using defaults");
            Settings::default()
        }
    }
}

/// What: Parse `key = value` settings content on top of the defaults.
///
/// Inputs:
/// - `content`: Raw file content
///
/// Output:
/// - Parsed `Settings`; unknown keys and unparsable values keep their defaults.
///
/// Details:
/// - Blank lines and lines starting with `#` or `//` are skipped, as are trailing comments.
/// - `user_id` and `auth_token` values are taken verbatim (only trimmed): credentials may
///   contain `#` or `//`, so they cannot carry a trailing comment.
/// - Keys are lowercased and `.`, `-` and spaces become `_`.
#[must_use]
pub fn parse_settings(content: &str) -> Settings {
    let mut out = Settings::default();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, val_raw)) = trimmed.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let raw = val_raw.trim();
        let val = strip_inline_comment(raw);
        match key.as_str() {
            "base_url" | "server_url" => {
                if !val.is_empty() {
                    out.base_url = normalize_base_url(val);
                }
            }
            "user_id" => out.user_id = non_empty(raw),
            "auth_token" | "token" => out.auth_token = non_empty(raw),
            "items_per_page" | "page_size" => {
                if let Ok(v) = val.parse::<usize>()
                    && v > 0
                {
                    out.items_per_page = v;
                }
            }
            "sort_direction" | "sort" => {
                if let Some(d) = SortDirection::from_config_key(val) {
                    out.sort_direction = d;
                }
            }
            "request_timeout_secs" | "timeout" => {
                if let Ok(v) = val.parse::<u64>() {
                    out.request_timeout_secs = v;
                }
            }
            _ => tracing::debug!(key = %key, "unknown settings key ignored"),
        }
    }
    out
}

/// Ensure the API base URL ends with a single `/` so relative paths join under it.
#[must_use]
pub fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim().trim_end_matches('/'))
}

fn non_empty(val: &str) -> Option<String> {
    if val.is_empty() {
        None
    } else {
        Some(val.to_string())
    }
}

/// Strip a trailing `//` or `#` comment. A leading `#` is kept as part of the value.
fn strip_inline_comment(mut s: &str) -> &str {
    if let Some(i) = s.find("//")
        && !s[..i].ends_with(':')
    {
        s = &s[..i];
    }
    if let Some(i_rel) = if let Some(stripped) = s.strip_prefix('#') {
        stripped.find('#').map(|j| j + 1)
    } else {
        s.find('#')
    } {
        s = &s[..i_rel];
    }
    s.trim()
}

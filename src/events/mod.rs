//! Live app notifications and the listener registry they are delivered through.
//!
//! A transport (websocket, stdin, tests) decodes notifications into
//! [`AppEvent`] and hands them to an [`AppEventSource`], which fans them out
//! to every listener registered for the event's [`AppEventKind`].

use tokio::sync::mpsc;

mod hub;

pub use hub::EventHub;

/// The four notification types the marketplace list listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppEventKind {
    /// An app was installed.
    Added,
    /// An installed app was updated to another version.
    Updated,
    /// An app was uninstalled.
    Removed,
    /// An installed app changed status.
    StatusChanged,
}

impl AppEventKind {
    /// Every kind, in registration order.
    pub const ALL: [Self; 4] = [Self::Added, Self::Updated, Self::Removed, Self::StatusChanged];

    /// Event name as it appears on the wire.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Added => "app/added",
            Self::Updated => "app/updated",
            Self::Removed => "app/removed",
            Self::StatusChanged => "app/statusUpdate",
        }
    }
}

/// A decoded live notification.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event")]
pub enum AppEvent {
    /// See [`AppEventKind::Added`].
    #[serde(rename = "app/added")]
    Added {
        /// Affected app.
        #[serde(rename = "appId")]
        app_id: String,
    },
    /// See [`AppEventKind::Updated`].
    #[serde(rename = "app/updated")]
    Updated {
        /// Affected app.
        #[serde(rename = "appId")]
        app_id: String,
    },
    /// See [`AppEventKind::Removed`].
    #[serde(rename = "app/removed")]
    Removed {
        /// Affected app.
        #[serde(rename = "appId")]
        app_id: String,
    },
    /// See [`AppEventKind::StatusChanged`].
    #[serde(rename = "app/statusUpdate")]
    StatusChanged {
        /// Affected app.
        #[serde(rename = "appId")]
        app_id: String,
        /// New status token.
        status: String,
    },
}

impl AppEvent {
    /// Kind used to route the event to listeners.
    #[must_use]
    pub const fn kind(&self) -> AppEventKind {
        match self {
            Self::Added { .. } => AppEventKind::Added,
            Self::Updated { .. } => AppEventKind::Updated,
            Self::Removed { .. } => AppEventKind::Removed,
            Self::StatusChanged { .. } => AppEventKind::StatusChanged,
        }
    }

    /// Identifier of the affected app.
    #[must_use]
    pub fn app_id(&self) -> &str {
        match self {
            Self::Added { app_id }
            | Self::Updated { app_id }
            | Self::Removed { app_id }
            | Self::StatusChanged { app_id, .. } => app_id,
        }
    }

    /// What: Decode one JSON-encoded notification.
    ///
    /// Inputs:
    /// - `line`: A single JSON object such as `{"event":"app/removed","appId":"x"}`
    ///
    /// Output:
    /// - The decoded event, or the decoding error.
    ///
    /// # Errors
    /// - Returns `Err` for invalid JSON, an unknown `event` tag or missing fields
    pub fn from_json_line(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line.trim())
    }
}

/// Handle returned by registration, used to unregister the same listener later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Source of live notifications with per-kind listener registration.
pub trait AppEventSource {
    /// Register `listener` to receive every event of `kind`.
    fn register_listener(
        &self,
        kind: AppEventKind,
        listener: mpsc::UnboundedSender<AppEvent>,
    ) -> ListenerId;

    /// Remove a listener previously registered for `kind`.
    ///
    /// Returns `false` when no such registration exists.
    fn unregister_listener(&self, kind: AppEventKind, id: ListenerId) -> bool;
}

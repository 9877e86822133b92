//! Marketplace list controller.
//!
//! Owns the merged list of marketplace apps, keeps it current from live
//! notifications, and derives the page shown by the rendering layer.

use std::future::Future;

use tokio::sync::mpsc;

use crate::events::{AppEvent, AppEventKind, AppEventSource, ListenerId};
use crate::logic::{AppUpdate, apply_update, derive_view, merge_catalog};
use crate::sources::{AppsApi, Result};
use crate::state::{AppRecord, ListView, ViewQuery};

mod report;

pub use report::{ErrorReporter, TracingReporter};

/// State holder behind the marketplace list.
///
/// The controller is the only writer of its list. Handlers take `&mut self`,
/// so every notification is applied against the current list.
pub struct MarketplaceController<A, R> {
    /// Remote apps API.
    api: A,
    /// Where request failures go.
    reporter: R,
    /// Canonical working list, A to Z by name.
    apps: Vec<AppRecord>,
    /// Receiving end shared by the four registered listeners.
    events: Option<mpsc::UnboundedReceiver<AppEvent>>,
    /// Registrations to undo on teardown.
    registrations: Vec<(AppEventKind, ListenerId)>,
}

impl<A: AppsApi, R: ErrorReporter> MarketplaceController<A, R> {
    /// What: Load the merged list and start listening for notifications.
    ///
    /// Inputs:
    /// - `api`: Remote apps API
    /// - `reporter`: Failure sink
    /// - `source`: Notification source to register the four listeners with
    ///
    /// Output:
    /// - A controller holding the merged, A to Z ordered list.
    ///
    /// Details:
    /// - The catalog and installed listings are fetched concurrently.
    /// - On failure the error is reported, the list stays empty and no
    ///   listener is registered.
    pub async fn activate<S>(api: A, reporter: R, source: &S) -> Self
    where
        S: AppEventSource + ?Sized,
    {
        let mut ctl = Self {
            api,
            reporter,
            apps: Vec::new(),
            events: None,
            registrations: Vec::new(),
        };
        match ctl.load().await {
            Ok(apps) => {
                tracing::info!(count = apps.len(), "marketplace list loaded");
                ctl.apps = apps;
                ctl.subscribe(source);
            }
            Err(e) => ctl.reporter.report(e.as_ref()),
        }
        ctl
    }

    async fn load(&self) -> Result<Vec<AppRecord>> {
        let (marketplace, installed) = futures::try_join!(
            self.api.get_apps_from_marketplace(),
            self.api.get_apps()
        )?;
        Ok(merge_catalog(marketplace, installed))
    }

    fn subscribe<S>(&mut self, source: &S)
    where
        S: AppEventSource + ?Sized,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        for kind in AppEventKind::ALL {
            let id = source.register_listener(kind, tx.clone());
            self.registrations.push((kind, id));
        }
        self.events = Some(rx);
    }

    /// Canonical working list, A to Z by name.
    #[must_use]
    pub fn apps(&self) -> &[AppRecord] {
        &self.apps
    }

    /// Whether the listeners are registered (activation succeeded).
    #[must_use]
    pub const fn is_listening(&self) -> bool {
        self.events.is_some()
    }

    /// Derive the requested page of the list.
    #[must_use]
    pub fn view(&self, query: &ViewQuery) -> ListView {
        derive_view(&self.apps, query)
    }

    /// Wait for the next notification; `None` when not listening or all senders are gone.
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        match self.events.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }

    /// What: Apply one notification.
    ///
    /// Inputs:
    /// - `event`: Decoded notification
    ///
    /// Output:
    /// - `true` when the list changed.
    pub async fn handle_event(&mut self, event: AppEvent) -> bool {
        tracing::debug!(event = event.kind().wire_name(), app_id = %event.app_id(), "app event");
        match event {
            AppEvent::Added { app_id } | AppEvent::Updated { app_id } => {
                self.handle_app_added_or_updated(&app_id).await
            }
            AppEvent::Removed { app_id } => self.handle_app_removed(&app_id),
            AppEvent::StatusChanged { app_id, status } => {
                self.handle_app_status_changed(&app_id, status)
            }
        }
    }

    /// What: Refresh one app after it was installed or updated.
    ///
    /// Inputs:
    /// - `app_id`: Affected app
    ///
    /// Output:
    /// - `true` when the list changed; `false` when unchanged or a fetch failed.
    ///
    /// Details:
    /// - Fetches status and installed version first, then the marketplace
    ///   detail at that version. Failures are reported and leave the list as is.
    /// - An app not in the list yet is inserted at its name position.
    pub async fn handle_app_added_or_updated(&mut self, app_id: &str) -> bool {
        match self.fetch_installed_record(app_id).await {
            Ok(rec) => apply_update(&mut self.apps, AppUpdate::Upsert(rec)),
            Err(e) => {
                self.reporter.report(e.as_ref());
                false
            }
        }
    }

    async fn fetch_installed_record(&self, app_id: &str) -> Result<AppRecord> {
        let info = self.api.get_app(app_id).await?;
        let detail = self
            .api
            .get_app_from_marketplace(app_id, &info.version)
            .await?;
        Ok(AppRecord::installed(detail, info.status, info.version))
    }

    /// Mark an app uninstalled; unknown ids are ignored. Returns `true` on change.
    pub fn handle_app_removed(&mut self, app_id: &str) -> bool {
        apply_update(
            &mut self.apps,
            AppUpdate::Removed {
                app_id: app_id.to_string(),
            },
        )
    }

    /// Set an app's status; unknown ids are ignored. Returns `true` on change.
    pub fn handle_app_status_changed(&mut self, app_id: &str, status: String) -> bool {
        apply_update(
            &mut self.apps,
            AppUpdate::StatusChanged {
                app_id: app_id.to_string(),
                status,
            },
        )
    }

    /// What: Apply notifications until `shutdown` resolves or the source goes away.
    ///
    /// Inputs:
    /// - `shutdown`: Future that ends the loop
    /// - `on_change`: Called after every notification that changed the list
    ///
    /// Output:
    /// - Returns when `shutdown` completes or no more events can arrive.
    ///
    /// Details:
    /// - Queued notifications are drained before `shutdown` is honored.
    pub async fn run_until<F, C>(&mut self, shutdown: F, mut on_change: C)
    where
        F: Future<Output = ()>,
        C: FnMut(&Self),
    {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                biased;
                ev = self.next_event() => match ev {
                    Some(ev) => {
                        if self.handle_event(ev).await {
                            on_change(self);
                        }
                    }
                    None => break,
                },
                () = &mut shutdown => break,
            }
        }
    }

    /// What: Stop listening and release the controller.
    ///
    /// Inputs:
    /// - `source`: The source passed to [`Self::activate`]
    ///
    /// Output:
    /// - The final list, for callers that want to keep it.
    ///
    /// Details:
    /// - Unregisters exactly the listeners registered at activation. The
    ///   controller is consumed, so nothing can be applied afterwards.
    pub fn teardown<S>(mut self, source: &S) -> Vec<AppRecord>
    where
        S: AppEventSource + ?Sized,
    {
        for (kind, id) in self.registrations.drain(..) {
            if !source.unregister_listener(kind, id) {
                tracing::debug!(event = kind.wire_name(), "listener already gone");
            }
        }
        self.events = None;
        tracing::info!("marketplace list torn down");
        self.apps
    }
}

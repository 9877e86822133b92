use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use super::{AppEvent, AppEventKind, AppEventSource, ListenerId};

/// Registered listeners, grouped by event kind.
type ListenerMap = HashMap<AppEventKind, Vec<(ListenerId, mpsc::UnboundedSender<AppEvent>)>>;

/// In-process [`AppEventSource`]: transports call [`EventHub::dispatch`], listeners
/// receive events on their channels.
#[derive(Debug, Default)]
pub struct EventHub {
    /// Monotonic listener id source.
    next_id: AtomicU64,
    /// Listeners per kind, in registration order.
    listeners: Mutex<ListenerMap>,
}

impl EventHub {
    /// Create a hub with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ListenerMap> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// What: Deliver an event to every listener registered for its kind.
    ///
    /// Inputs:
    /// - `event`: Decoded notification
    ///
    /// Output:
    /// - Number of listeners the event was delivered to.
    ///
    /// Details:
    /// - Listeners whose receiving side is gone are dropped from the registry.
    pub fn dispatch(&self, event: &AppEvent) -> usize {
        let kind = event.kind();
        let mut map = self.lock();
        let Some(list) = map.get_mut(&kind) else {
            tracing::trace!(event = kind.wire_name(), "no listeners");
            return 0;
        };
        let before = list.len();
        list.retain(|(_, tx)| tx.send(event.clone()).is_ok());
        if list.len() < before {
            tracing::debug!(
                event = kind.wire_name(),
                pruned = before - list.len(),
                "dropped closed listeners"
            );
        }
        list.len()
    }

    /// Number of live registrations for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: AppEventKind) -> usize {
        self.lock().get(&kind).map_or(0, Vec::len)
    }
}

impl AppEventSource for EventHub {
    fn register_listener(
        &self,
        kind: AppEventKind,
        listener: mpsc::UnboundedSender<AppEvent>,
    ) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().entry(kind).or_default().push((id, listener));
        tracing::debug!(event = kind.wire_name(), listener = id.0, "listener registered");
        id
    }

    fn unregister_listener(&self, kind: AppEventKind, id: ListenerId) -> bool {
        let mut map = self.lock();
        let Some(list) = map.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(lid, _)| *lid != id);
        let removed = list.len() < before;
        if removed {
            tracing::debug!(event = kind.wire_name(), listener = id.0, "listener unregistered");
        }
        removed
    }
}

//! Persisted "signed in" flag with cross-view notification.

use std::sync::{Arc, Mutex, PoisonError};

use shared::events::SessionEvent;
use storage::KeyValueStore;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::bus::{EventBus, Subscription};

pub const AUTH_STORAGE_KEY: &str = "ableed:auth";
const AUTHENTICATED_VALUE: &str = "1";
const SESSION_EVENT_CAPACITY: usize = 64;

#[derive(Debug, Default, Clone, Copy)]
struct LocalMirror {
    last_written: Option<bool>,
    write_failed: bool,
}

/// Single writer of the session flag.
///
/// Storage failures never reach the caller. When the backing store rejects a
/// write or cannot be read, the flag falls back to the value last written in
/// this process, so notifications and reads stay consistent until restart.
pub struct SessionFlagStore {
    storage: Arc<dyn KeyValueStore>,
    mirror: Mutex<LocalMirror>,
    bus: EventBus<SessionEvent>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionFlagStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);
        Self {
            storage,
            mirror: Mutex::new(LocalMirror::default()),
            bus: EventBus::new("auth:change"),
            events,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        let mirror = *self.mirror.lock().unwrap_or_else(PoisonError::into_inner);
        if mirror.write_failed {
            return mirror.last_written.unwrap_or(false);
        }

        match self.storage.get(AUTH_STORAGE_KEY) {
            Ok(value) => value.as_deref() == Some(AUTHENTICATED_VALUE),
            Err(err) => {
                debug!(error = %err, "session flag unreadable; using in-process value");
                mirror.last_written.unwrap_or(false)
            }
        }
    }

    pub fn login(&self) {
        let persisted = self.storage.set(AUTH_STORAGE_KEY, AUTHENTICATED_VALUE);
        self.record_write(true, persisted);
        self.broadcast(true);
    }

    pub fn logout(&self) {
        let persisted = self.storage.remove(AUTH_STORAGE_KEY);
        self.record_write(false, persisted);
        self.broadcast(false);
    }

    /// Registers `listener` for every subsequent login/logout broadcast.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.bus
            .subscribe(move |event: &SessionEvent| listener(event.is_authenticated()))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.bus.listener_count()
    }

    pub(crate) fn release_all(&self) -> usize {
        self.bus.clear()
    }

    fn record_write(&self, value: bool, persisted: storage::Result<()>) {
        let write_failed = match persisted {
            Ok(()) => false,
            Err(err) => {
                warn!(error = %err, is_authenticated = value, "session flag not persisted");
                true
            }
        };

        let mut mirror = self.mirror.lock().unwrap_or_else(PoisonError::into_inner);
        mirror.last_written = Some(value);
        mirror.write_failed = write_failed;
    }

    fn broadcast(&self, is_authenticated: bool) {
        let event = SessionEvent::AuthChanged { is_authenticated };
        let delivered = self.bus.publish(&event);
        let _ = self.events.send(event);
        info!(is_authenticated, listeners = delivered, "session flag changed");
    }
}

impl std::fmt::Debug for SessionFlagStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionFlagStore")
            .field("listeners", &self.bus.listener_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;

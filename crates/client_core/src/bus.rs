//! Ordered, synchronous publish/subscribe registry.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::trace;

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    next_id: u64,
    listeners: Vec<(u64, Listener<E>)>,
}

/// Listeners run in registration order, synchronously, inside `publish`.
///
/// The listener list is snapshotted before dispatch, so a listener may
/// subscribe, unsubscribe or publish again without deadlocking. Changes made
/// during a dispatch take effect from the next `publish`.
pub struct EventBus<E> {
    name: &'static str,
    registry: Arc<Mutex<Registry<E>>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E: 'static> EventBus<E> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = {
            let mut registry = lock(&self.registry);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Arc::new(listener)));
            id
        };
        trace!(bus = self.name, listener = id, "listener registered");

        let registry: Weak<Mutex<Registry<E>>> = Arc::downgrade(&self.registry);
        let name = self.name;
        Subscription {
            id,
            release: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    lock(&registry).listeners.retain(|(lid, _)| *lid != id);
                    trace!(bus = name, listener = id, "listener released");
                }
            })),
        }
    }

    /// Delivers `event` to every current listener and returns how many ran.
    pub fn publish(&self, event: &E) -> usize {
        let snapshot: Vec<Listener<E>> = lock(&self.registry)
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in &snapshot {
            listener(event);
        }
        snapshot.len()
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.registry).listeners.len()
    }

    /// Drops every registration. Outstanding [`Subscription`]s become inert.
    pub fn clear(&self) -> usize {
        let mut registry = lock(&self.registry);
        let released = registry.listeners.len();
        registry.listeners.clear();
        released
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to one listener registration.
///
/// Dropping it releases the listener, the same as calling
/// [`Subscription::unsubscribe`].
#[must_use = "dropping a Subscription immediately unsubscribes its listener"]
pub struct Subscription {
    id: u64,
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/bus_tests.rs"]
mod tests;

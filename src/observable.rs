//! Subscribe/publish store for navigator events.
//!
//! `Observable` replaces ad-hoc global listener lists with an object that
//! owns its subscribers. Every `subscribe` returns a `Subscription`; dropping
//! it removes the callback, so teardown is tied to the subscriber's lifetime.

use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::navigator::NavigatorEvent;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
}

/// A set of callbacks notified on `publish`.
///
/// Cloning shares the subscriber set.
pub struct Observable<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Observable<T> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Registers a callback until the returned subscription is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let mut registry = self.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.subscribers.push((id, Arc::new(callback)));

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
            active: true,
        }
    }

    /// Calls every subscriber with `value`.
    ///
    /// Callbacks run outside the lock, so a callback may subscribe or drop
    /// subscriptions itself.
    pub fn publish(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = self
            .lock()
            .subscribers
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(value);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    /// Removes all subscribers. Outstanding subscriptions become inert.
    pub fn clear(&self) {
        self.lock().subscribers.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Registry<T>> {
        // A panicking subscriber must not take the whole store down.
        self.registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Handle that keeps a callback registered.
pub struct Subscription<T> {
    id: u64,
    registry: Weak<Mutex<Registry<T>>>,
    active: bool,
}

impl<T> Subscription<T> {
    /// Keeps the callback registered for the lifetime of the observable.
    pub fn detach(mut self) {
        self.active = false;
    }

    /// Removes the callback now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            registry.subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}

static NAVIGATION_EVENTS: Lazy<Observable<NavigatorEvent>> = Lazy::new(Observable::new);

/// Process-wide navigator event store.
///
/// Initialized on first use. Call `clear()` on shutdown to dispose of any
/// detached subscribers.
pub fn navigation_events() -> &'static Observable<NavigatorEvent> {
    &NAVIGATION_EVENTS
}

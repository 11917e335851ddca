// SPDX-License-Identifier: MPL-2.0
//! Observable value store.
//!
//! [`Store`] holds a single value and notifies subscribers synchronously
//! whenever it is replaced. Dispatch is single-threaded: `set_value` and
//! every listener invocation complete on the calling turn before
//! `set_value` returns. There is no locking and no deferred delivery.
//!
//! Because `set_value` takes ownership of the next value, every call is a
//! state change by construction. The owner (the notification manager)
//! builds a fresh snapshot for each mutation and never calls `set_value`
//! for a no-op, which is what keeps "listener fired" equivalent to "state
//! changed" for subscribers.

use std::fmt;

/// Handle identifying one subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// A single-value container with synchronous change notification.
pub struct Store<T> {
    value: T,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_subscription: u64,
}

impl<T> Store<T> {
    /// Creates a store holding `initial` with no subscribers.
    pub fn new(initial: T) -> Self {
        Self {
            value: initial,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Returns the current value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Replaces the value and synchronously notifies every subscriber with
    /// the new value, in subscription order.
    pub fn set_value(&mut self, next: T) {
        self.value = next;
        for (_, listener) in &mut self.listeners {
            listener(&self.value);
        }
    }

    /// Registers a listener invoked on every subsequent `set_value`.
    ///
    /// Returns a [`SubscriptionId`] accepted by [`Store::unsubscribe`].
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes one listener. Unknown or already-removed ids are a safe
    /// no-op; remaining subscribers are unaffected.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.value)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

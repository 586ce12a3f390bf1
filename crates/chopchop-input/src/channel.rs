//! Typed notification channels with scoped subscriptions.
//!
//! A [`Channel`] fans a value out to every registered listener, in the order
//! they subscribed. Registering returns a [`Subscription`] guard; the listener
//! stays registered exactly as long as the guard lives. Consumers keep the
//! guard next to the state the listener touches and drop both together on
//! teardown.
//!
//! ```text
//! router.gameplay().jump.subscribe(|_| ...)  ──▶ Subscription
//!                                                    │ drop
//!                                                    ▼
//!                                           listener removed
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

type Listener<T> = Arc<Mutex<Box<dyn FnMut(&T) + Send>>>;

struct Slot<T> {
    id: u64,
    listener: Listener<T>,
}

struct Registry<T> {
    next_id: AtomicU64,
    slots: Mutex<Vec<Slot<T>>>,
}

/// Type-erased removal hook so `Subscription` is not generic.
trait Unsubscribe: Send + Sync {
    fn remove(&self, id: u64);
}

impl<T: 'static> Unsubscribe for Registry<T> {
    fn remove(&self, id: u64) {
        self.slots.lock().retain(|slot| slot.id != id);
    }
}

/// A typed notification channel.
pub struct Channel<T> {
    name: &'static str,
    registry: Arc<Registry<T>>,
}

impl<T: 'static> Channel<T> {
    /// Create an empty channel. `name` only appears in traces.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            registry: Arc::new(Registry {
                next_id: AtomicU64::new(0),
                slots: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Register a listener. It is removed when the returned guard drops.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&T) + Send + 'static,
    {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry.slots.lock().push(Slot {
            id,
            listener: Arc::new(Mutex::new(Box::new(listener))),
        });
        tracing::trace!(channel = self.name, listener = id, "subscribed");

        let registry: Arc<dyn Unsubscribe> = self.registry.clone();
        Subscription {
            channel: self.name,
            id,
            registry: Some(Arc::downgrade(&registry)),
        }
    }

    /// Deliver `value` to every listener registered at the time of the call.
    ///
    /// A listener already running further up the stack (it re-entrantly
    /// caused this emission) is skipped rather than re-entered.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<(u64, Listener<T>)> = self
            .registry
            .slots
            .lock()
            .iter()
            .map(|slot| (slot.id, slot.listener.clone()))
            .collect();

        for (id, listener) in snapshot {
            match listener.try_lock() {
                Some(mut guard) => {
                    let callback = &mut *guard;
                    callback(value);
                }
                None => {
                    tracing::warn!(channel = self.name, listener = id, "skipping re-entrant listener");
                }
            }
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.slots.lock().len()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("listeners", &self.registry.slots.lock().len())
            .finish()
    }
}

/// Guard for a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    channel: &'static str,
    id: u64,
    registry: Option<Weak<dyn Unsubscribe>>,
}

impl Subscription {
    /// Unsubscribe now. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}

    /// Name of the channel this subscription belongs to.
    pub fn channel(&self) -> &'static str {
        self.channel
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // Channel may already be gone; nothing to detach from then.
        if let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) {
            registry.remove(self.id);
            tracing::trace!(channel = self.channel, listener = self.id, "unsubscribed");
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_in_subscription_order() {
        let channel: Channel<u32> = Channel::new("test");
        let seen = Arc::new(Mutex::new(Vec::new()));

        let a = seen.clone();
        let _first = channel.subscribe(move |v| a.lock().push(("first", *v)));
        let b = seen.clone();
        let _second = channel.subscribe(move |v| b.lock().push(("second", *v)));

        channel.emit(&7);
        assert_eq!(*seen.lock(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let channel: Channel<()> = Channel::new("test");
        let hits = Arc::new(AtomicU64::new(0));

        let counter = hits.clone();
        let sub = channel.subscribe(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });
        channel.emit(&());
        assert_eq!(channel.listener_count(), 1);

        drop(sub);
        channel.emit(&());
        assert_eq!(channel.listener_count(), 0);
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_subscription_outlives_channel() {
        let channel: Channel<()> = Channel::new("test");
        let sub = channel.subscribe(|_| {});
        drop(channel);
        // Must not panic when the registry is already gone.
        sub.unsubscribe();
    }

    #[test]
    fn test_reentrant_emit_skips_running_listener() {
        let channel: Arc<Channel<u32>> = Arc::new(Channel::new("test"));
        let depth = Arc::new(AtomicU64::new(0));

        let inner_channel = Arc::downgrade(&channel);
        let counter = depth.clone();
        let _sub = channel.subscribe(move |v| {
            counter.fetch_add(1, Ordering::Relaxed);
            if let Some(ch) = inner_channel.upgrade() {
                // Would recurse forever without the guard.
                ch.emit(&(v + 1));
            }
        });

        channel.emit(&0);
        assert_eq!(depth.load(Ordering::Relaxed), 1);
    }
}

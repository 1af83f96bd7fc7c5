//! Subscriber-based notifications for handler replacements.

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

type Callback = Arc<dyn Fn() + Send + Sync>;

/// Handle for a subscription that can be dropped to unsubscribe.
///
/// When the handle is dropped, the subscription is removed before `drop`
/// returns, so the callback will not run for any later replacement.
pub struct SubscriptionHandle {
    id: usize,
    registry: Arc<SubscriberRegistryShared>,
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        let id = self.id;
        let mut inner = self.registry.inner.lock();
        inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.registry
            .active
            .store(inner.subscribers.len(), Ordering::Release);
    }
}

impl std::fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.id)
            .finish()
    }
}

/// Internal subscriber registry state.
struct SubscriberRegistryInner {
    subscribers: Vec<(usize, Callback)>,
    next_id: usize,
}

/// State shared between the registry, its clones and outstanding handles.
struct SubscriberRegistryShared {
    inner: Mutex<SubscriberRegistryInner>,
    /// Mirrors `subscribers.len()` so it can be read without the lock
    active: AtomicUsize,
}

/// Registry for callbacks that run after a handler is replaced.
///
/// # Examples
///
/// ```rust
/// use hotswap_handler::notify::SubscriberRegistry;
///
/// let registry = SubscriberRegistry::new();
///
/// let handle = registry.subscribe(|| {
///     println!("Handler swapped!");
/// });
///
/// registry.notify_all();
///
/// // Unsubscribe by dropping the handle
/// drop(handle);
/// assert_eq!(registry.subscriber_count(), 0);
/// ```
pub struct SubscriberRegistry {
    shared: Arc<SubscriberRegistryShared>,
}

impl SubscriberRegistry {
    /// Create a new subscriber registry.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(SubscriberRegistryShared {
                inner: Mutex::new(SubscriberRegistryInner {
                    subscribers: Vec::new(),
                    next_id: 0,
                }),
                active: AtomicUsize::new(0),
            }),
        }
    }

    /// Register a callback. Returns a handle that can be dropped to unsubscribe.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionHandle
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut inner = self.shared.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Arc::new(callback)));
        self.shared
            .active
            .store(inner.subscribers.len(), Ordering::Release);

        SubscriptionHandle {
            id,
            registry: Arc::clone(&self.shared),
        }
    }

    /// Call every registered callback in subscription order.
    ///
    /// The callbacks run after the registry lock is released, so a callback may
    /// subscribe, unsubscribe or trigger another replacement.
    pub fn notify_all(&self) {
        let callbacks: Vec<Callback> = self
            .shared
            .inner
            .lock()
            .subscribers
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in callbacks {
            callback();
        }
    }

    /// Get the number of active subscribers.
    ///
    /// Reads a counter kept next to the subscriber list, so it never waits on
    /// a concurrent subscribe or unsubscribe.
    pub fn subscriber_count(&self) -> usize {
        self.shared.active.load(Ordering::Acquire)
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SubscriberRegistry {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

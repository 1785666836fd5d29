//! Synchronous listener registry with drop-to-unsubscribe guards.
//!
//! Listeners are invoked after every lock has been released, so a listener
//! may subscribe, unsubscribe or mutate the value it observes without
//! deadlocking. Values go through an [`Outbox`], which delivers them in the
//! order the changes happened even when a listener triggers a nested change
//! or two threads change the value at once.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

/// Set of callbacks notified with a borrowed value.
pub(crate) struct ListenerSet<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T: 'static> ListenerSet<T> {
    pub(crate) fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register `listener` until the returned guard is dropped.
    pub(crate) fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = {
            let mut registry = lock(&self.registry);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, Arc::new(listener)));
            id
        };

        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = weak.upgrade() {
                lock(&registry).entries.retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Call every registered listener with `value`, in subscription order.
    pub(crate) fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = lock(&self.registry)
            .entries
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(value);
        }
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.registry).entries.len()
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Pending<T> {
    queue: VecDeque<T>,
    draining: bool,
}

/// Listener set fed through a FIFO queue with a single drainer at a time.
///
/// Producers call [`enqueue`](Self::enqueue) while still holding the lock
/// that serializes their changes, then [`flush`](Self::flush) once it is
/// released. Whoever finds the queue idle drains it; a nested or concurrent
/// `flush` returns at once and its value is delivered by the active drainer,
/// after the values queued before it.
pub(crate) struct Outbox<T> {
    listeners: ListenerSet<T>,
    pending: Mutex<Pending<T>>,
}

impl<T: 'static> Outbox<T> {
    pub(crate) fn new() -> Self {
        Self {
            listeners: ListenerSet::new(),
            pending: Mutex::new(Pending {
                queue: VecDeque::new(),
                draining: false,
            }),
        }
    }

    pub(crate) fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn enqueue(&self, value: T) {
        lock(&self.pending).queue.push_back(value);
    }

    /// Deliver queued values in order, unless another call is already doing so.
    pub(crate) fn flush(&self) {
        {
            let mut pending = lock(&self.pending);
            if pending.draining {
                return;
            }
            pending.draining = true;
        }

        let mut guard = DrainGuard {
            pending: &self.pending,
            armed: true,
        };
        loop {
            let next = {
                let mut pending = lock(&self.pending);
                let next = pending.queue.pop_front();
                if next.is_none() {
                    pending.draining = false;
                    guard.armed = false;
                }
                next
            };
            match next {
                Some(value) => self.listeners.notify(&value),
                None => break,
            }
        }
    }
}

/// Releases the drainer role if a listener panics mid-delivery.
struct DrainGuard<'a, T> {
    pending: &'a Mutex<Pending<T>>,
    armed: bool,
}

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            lock(self.pending).draining = false;
        }
    }
}

/// Guard returned by `subscribe`; the listener is removed when it is dropped.
#[must_use = "dropping a Subscription immediately removes the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Remove the listener now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&u32) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        (count, move |_: &u32| {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn should_notify_every_listener() {
        let set = ListenerSet::new();
        let (a, listener_a) = counter();
        let (b, listener_b) = counter();
        let _sub_a = set.subscribe(listener_a);
        let _sub_b = set.subscribe(listener_b);

        set.notify(&1);

        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn should_notify_in_subscription_order() {
        let set = ListenerSet::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let first = Arc::clone(&seen);
        let second = Arc::clone(&seen);
        let _a = set.subscribe(move |v: &u32| first.lock().unwrap().push(("first", *v)));
        let _b = set.subscribe(move |v: &u32| second.lock().unwrap().push(("second", *v)));

        set.notify(&7);

        assert_eq!(*seen.lock().unwrap(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn should_stop_notifying_after_drop() {
        let set = ListenerSet::new();
        let (count, listener) = counter();
        let sub = set.subscribe(listener);
        set.notify(&1);
        drop(sub);
        set.notify(&2);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn should_only_remove_own_listener_on_unsubscribe() {
        let set = ListenerSet::new();
        let (a, listener_a) = counter();
        let (b, listener_b) = counter();
        let sub_a = set.subscribe(listener_a);
        let _sub_b = set.subscribe(listener_b);

        sub_a.unsubscribe();
        set.notify(&1);

        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 1);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn should_outlive_registry_without_panicking() {
        let set = ListenerSet::new();
        let (_, listener) = counter();
        let sub = set.subscribe(listener);
        drop(set);
        drop(sub);
    }

    #[test]
    fn should_deliver_nested_values_after_current_one() {
        let outbox = Arc::new(Outbox::<u32>::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let nested = Arc::clone(&outbox);
        let _first = outbox.subscribe(move |v| {
            if *v == 1 {
                nested.enqueue(2);
                nested.flush();
            }
        });
        let sink = Arc::clone(&seen);
        let _second = outbox.subscribe(move |v| sink.lock().unwrap().push(*v));

        outbox.enqueue(1);
        outbox.flush();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn should_keep_delivering_after_listener_panics() {
        let outbox = Outbox::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = outbox.subscribe(move |v| {
            assert!(*v != 1, "listener failure");
            sink.lock().unwrap().push(*v);
        });

        outbox.enqueue(1);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| outbox.flush()));
        assert!(result.is_err());

        outbox.enqueue(2);
        outbox.flush();

        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[test]
    fn should_allow_listener_to_subscribe_during_notify() {
        let set = Arc::new(ListenerSet::<u32>::new());
        let nested = Arc::new(Mutex::new(Vec::new()));
        let set_clone = Arc::clone(&set);
        let nested_clone = Arc::clone(&nested);
        let _sub = set.subscribe(move |_| {
            let sub = set_clone.subscribe(|_| {});
            nested_clone.lock().unwrap().push(sub);
        });

        set.notify(&1);

        assert_eq!(set.len(), 2);
    }
}

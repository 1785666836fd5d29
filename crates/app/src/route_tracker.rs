//! In-process route source backed by a tokio [`watch`] channel.
//!
//! Routers commit every resolved route here; listeners only hear about a
//! commit when the route identity actually differs from the current one,
//! and hear about commits in the order they were applied.

use std::sync::Arc;

use tokio::sync::watch;

use navloader_domain::route::RouteIdentity;

use crate::listeners::{Outbox, Subscription};
use crate::ports::RouteSource;

struct Inner {
    current: watch::Sender<RouteIdentity>,
    listeners: Outbox<RouteIdentity>,
}

/// Observable current route for one UI session.
#[derive(Clone)]
pub struct RouteTracker {
    inner: Arc<Inner>,
}

impl RouteTracker {
    /// Start tracking at `initial`.
    #[must_use]
    pub fn new(initial: impl Into<RouteIdentity>) -> Self {
        let (current, _) = watch::channel(initial.into());
        Self {
            inner: Arc::new(Inner {
                current,
                listeners: Outbox::new(),
            }),
        }
    }

    /// Record that `route` is now the active route.
    ///
    /// Returns `false`, without notifying anyone, when `route` equals the
    /// current route by value.
    pub fn commit(&self, route: impl Into<RouteIdentity>) -> bool {
        let route = route.into();
        let changed = self.inner.current.send_if_modified(|current| {
            if *current == route {
                return false;
            }
            *current = route.clone();
            self.inner.listeners.enqueue(route.clone());
            true
        });

        if changed {
            tracing::debug!(%route, "route changed");
            self.inner.listeners.flush();
        } else {
            tracing::trace!(%route, "same route committed, no change signalled");
        }
        changed
    }

    /// Async view of the current route.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<RouteIdentity> {
        self.inner.current.subscribe()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }
}

impl RouteSource for RouteTracker {
    fn current(&self) -> RouteIdentity {
        self.inner.current.borrow().clone()
    }

    fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&RouteIdentity) + Send + Sync + 'static,
    {
        self.inner.listeners.subscribe(listener)
    }
}

impl std::fmt::Debug for RouteTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTracker")
            .field("current", &*self.inner.current.borrow())
            .field("listeners", &self.inner.listeners.len())
            .finish()
    }
}

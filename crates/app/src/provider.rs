//! Provider — wires the route-change observer into a UI session once.
//!
//! Rendering code may call [`NavigationLoadingProvider::mount`] on every
//! render; only the first call installs anything. The subscription is
//! released by [`unmount`](NavigationLoadingProvider::unmount) or when the
//! provider is dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::listeners::Subscription;
use crate::ports::{LoadingControl, RouteSource};
use crate::route_observer::RouteChangeObserver;

/// Owns the route subscription that clears navigation loading.
pub struct NavigationLoadingProvider<S, C> {
    source: S,
    observer: Arc<RouteChangeObserver<C>>,
    mounted: Mutex<Option<Subscription>>,
}

impl<S, C> NavigationLoadingProvider<S, C>
where
    S: RouteSource,
    C: LoadingControl + Send + Sync + 'static,
{
    /// Create an unmounted provider.
    #[must_use]
    pub fn new(source: S, control: C) -> Self {
        Self {
            source,
            observer: Arc::new(RouteChangeObserver::new(control)),
            mounted: Mutex::new(None),
        }
    }

    /// Install the route subscription if it is not installed yet.
    ///
    /// On first mount the observer also receives the current route, which
    /// clears any indicator left over from before the session started.
    /// Returns `true` when this call performed the installation.
    pub fn mount(&self) -> bool {
        {
            let mut mounted = self.lock_mounted();
            if mounted.is_some() {
                return false;
            }
            self.observer.reset();
            let observer = Arc::clone(&self.observer);
            *mounted = Some(self.source.subscribe(move |route| {
                observer.on_route_change(route);
            }));
        }

        // Subscribed first: a route committed in between is seen by the
        // listener, and the observer ignores it here as a repeat.
        let current = self.source.current();
        tracing::info!(route = %current, "navigation loading provider mounted");
        self.observer.on_route_change(&current);
        true
    }

    /// Remove the route subscription. Returns `false` if it was not mounted.
    pub fn unmount(&self) -> bool {
        let released = self.lock_mounted().take();
        match released {
            Some(subscription) => {
                subscription.unsubscribe();
                tracing::info!("navigation loading provider unmounted");
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.lock_mounted().is_some()
    }

    #[must_use]
    pub fn observer(&self) -> &RouteChangeObserver<C> {
        &self.observer
    }

    fn lock_mounted(&self) -> MutexGuard<'_, Option<Subscription>> {
        self.mounted.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S, C> std::fmt::Debug for NavigationLoadingProvider<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mounted = self
            .mounted
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or_default();
        f.debug_struct("NavigationLoadingProvider")
            .field("mounted", &mounted)
            .finish_non_exhaustive()
    }
}

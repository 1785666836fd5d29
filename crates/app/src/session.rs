//! Navigation session — one store, one route tracker, one mounted provider.
//!
//! A session is the explicitly owned replacement for a process-wide loading
//! singleton: UI code receives the session (or a handle cloned from it)
//! instead of reaching for ambient state.

use navloader_domain::route::RouteIdentity;

use crate::loading_store::LoadingStore;
use crate::navigation::NavigationIntent;
use crate::provider::NavigationLoadingProvider;
use crate::route_tracker::RouteTracker;

/// Coordinator wiring for a single UI session.
#[derive(Debug)]
pub struct NavigationSession {
    store: LoadingStore,
    routes: RouteTracker,
    provider: NavigationLoadingProvider<RouteTracker, LoadingStore>,
}

impl NavigationSession {
    /// Start a session at `initial_route` with the provider already mounted.
    #[must_use]
    pub fn new(initial_route: impl Into<RouteIdentity>, default_message: impl Into<String>) -> Self {
        let store = LoadingStore::with_default_message(default_message);
        let routes = RouteTracker::new(initial_route);
        let provider = NavigationLoadingProvider::new(routes.clone(), store.clone());
        provider.mount();
        Self {
            store,
            routes,
            provider,
        }
    }

    #[must_use]
    pub fn store(&self) -> &LoadingStore {
        &self.store
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTracker {
        &self.routes
    }

    #[must_use]
    pub fn provider(&self) -> &NavigationLoadingProvider<RouteTracker, LoadingStore> {
        &self.provider
    }

    /// Intent hook for trigger elements of this session.
    #[must_use]
    pub fn intent(&self) -> NavigationIntent<LoadingStore> {
        self.store.intent()
    }
}

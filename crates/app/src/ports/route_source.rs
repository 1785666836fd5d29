//! Route source port — where the application currently is.

use navloader_domain::route::RouteIdentity;

use crate::listeners::Subscription;

/// Exposes the committed route identity as an observable value.
///
/// Implementations must only deliver a value to listeners when it differs
/// (by value equality) from the previously committed one, and must keep it
/// stable otherwise.
pub trait RouteSource {
    /// The route identity committed most recently.
    fn current(&self) -> RouteIdentity;

    /// Register a listener called with each newly committed route.
    ///
    /// The listener stays registered until the returned [`Subscription`]
    /// is dropped.
    fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&RouteIdentity) + Send + Sync + 'static;
}

impl<T: RouteSource> RouteSource for std::sync::Arc<T> {
    fn current(&self) -> RouteIdentity {
        (**self).current()
    }

    fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&RouteIdentity) + Send + Sync + 'static,
    {
        (**self).subscribe(listener)
    }
}

//! Route-change observer — clears the indicator once a route commits.

use std::sync::{Mutex, PoisonError};

use navloader_domain::route::RouteIdentity;

use crate::ports::LoadingControl;

/// Hides the loading indicator whenever the committed route changes.
///
/// The first route seen (at mount) always counts as a change. After that,
/// a route equal by value to the last one seen is ignored, even if the
/// source re-delivers it. Any other route clears the indicator, including a
/// return to the route the navigation started from.
#[derive(Debug)]
pub struct RouteChangeObserver<C> {
    control: C,
    last_seen: Mutex<Option<RouteIdentity>>,
}

impl<C: LoadingControl> RouteChangeObserver<C> {
    #[must_use]
    pub fn new(control: C) -> Self {
        Self {
            control,
            last_seen: Mutex::new(None),
        }
    }

    /// React to a committed route. Returns `true` if the indicator was cleared.
    pub fn on_route_change(&self, route: &RouteIdentity) -> bool {
        {
            let mut last_seen = self
                .last_seen
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if last_seen.as_ref() == Some(route) {
                tracing::trace!(%route, "route unchanged, keeping loading state");
                return false;
            }
            *last_seen = Some(route.clone());
        }

        tracing::debug!(%route, "route committed, clearing navigation loading");
        self.control.hide_loading();
        true
    }

    /// Forget the last route so the next one counts as the first.
    pub(crate) fn reset(&self) {
        *self
            .last_seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The route this observer last reacted to.
    #[must_use]
    pub fn last_seen(&self) -> Option<RouteIdentity> {
        self.last_seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

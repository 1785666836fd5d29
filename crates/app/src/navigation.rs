//! Navigation intent hook — called by trigger elements at the moment of intent.

use crate::ports::LoadingControl;

/// Shows loading feedback as soon as the user asks to navigate.
///
/// The hook never compares the destination with the current route: a click
/// on the link to the page already displayed still shows feedback, and the
/// route observer clears it once the framework re-resolves the route.
#[derive(Debug, Clone)]
pub struct NavigationIntent<C> {
    control: C,
}

impl<C: LoadingControl> NavigationIntent<C> {
    #[must_use]
    pub fn new(control: C) -> Self {
        Self { control }
    }

    /// Show the indicator before the navigation request is dispatched.
    ///
    /// `None` uses the store's default message.
    pub fn request_navigation_feedback(&self, message: Option<&str>) {
        tracing::trace!(?message, "navigation intent");
        self.control.show_loading(message);
    }
}

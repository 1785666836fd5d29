//! Loading control port — the two mutations every indicator reacts to.

use std::sync::Arc;

/// Shows and hides the navigation loading indicator.
///
/// Both operations are total and idempotent: showing while loading only
/// replaces the message, hiding while idle does nothing.
pub trait LoadingControl {
    /// Enter the loading state. `None` selects the default message.
    fn show_loading(&self, message: Option<&str>);

    /// Leave the loading state.
    fn hide_loading(&self);
}

impl<T: LoadingControl + Send + Sync> LoadingControl for Arc<T> {
    fn show_loading(&self, message: Option<&str>) {
        (**self).show_loading(message);
    }

    fn hide_loading(&self) {
        (**self).hide_loading();
    }
}

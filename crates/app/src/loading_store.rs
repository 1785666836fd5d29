//! Loading store — the single source of truth for "is a navigation in flight".
//!
//! The state lives in a tokio [`watch`] channel: the sender serializes
//! mutations, `borrow` gives synchronous snapshots and receivers give async
//! renderers a change stream. Each change is queued for synchronous
//! listeners while the sender's lock is still held, so listeners see changes
//! in the order they were applied and the last snapshot a listener receives
//! is always the current state. An outermost call returns only after its
//! change has been delivered; a change made from inside a listener (or from
//! another thread while delivery is under way) is delivered by the call
//! already delivering, right after the changes before it.

use std::sync::Arc;

use tokio::sync::watch;

use navloader_domain::loading::{DEFAULT_LOADING_MESSAGE, LoadingState, now};

use crate::listeners::{Outbox, Subscription};
use crate::navigation::NavigationIntent;
use crate::ports::LoadingControl;

struct Inner {
    state: watch::Sender<LoadingState>,
    listeners: Outbox<LoadingState>,
    default_message: String,
}

/// Shared, explicitly owned loading state for one UI session.
///
/// Cloning yields another handle to the same state.
#[derive(Clone)]
pub struct LoadingStore {
    inner: Arc<Inner>,
}

impl Default for LoadingStore {
    fn default() -> Self {
        Self::with_default_message(DEFAULT_LOADING_MESSAGE)
    }
}

impl LoadingStore {
    /// Create an idle store using [`DEFAULT_LOADING_MESSAGE`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle store whose intents fall back to `message`.
    #[must_use]
    pub fn with_default_message(message: impl Into<String>) -> Self {
        let (state, _) = watch::channel(LoadingState::default());
        Self {
            inner: Arc::new(Inner {
                state,
                listeners: Outbox::new(),
                default_message: message.into(),
            }),
        }
    }

    /// Message used when an intent does not supply one.
    #[must_use]
    pub fn default_message(&self) -> &str {
        &self.inner.default_message
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> LoadingState {
        self.inner.state.borrow().clone()
    }

    /// Register a synchronous listener called with every new state.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&LoadingState) + Send + Sync + 'static,
    {
        self.inner.listeners.subscribe(listener)
    }

    /// Async view of the state, for renderers running on a tokio runtime.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<LoadingState> {
        self.inner.state.subscribe()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }

    /// Intent hook bound to this store.
    #[must_use]
    pub fn intent(&self) -> NavigationIntent<Self> {
        NavigationIntent::new(self.clone())
    }

    /// Hide only if the intent numbered `attempt` is still the one loading.
    ///
    /// Returns `true` when the indicator was hidden by this call.
    pub(crate) fn hide_if_attempt(&self, attempt: u64) -> bool {
        self.hide_where(|state| state.attempt() == attempt)
    }

    fn hide_where(&self, predicate: impl FnOnce(&LoadingState) -> bool) -> bool {
        let mut hidden = None;
        self.inner.state.send_if_modified(|state| {
            if !state.is_loading() || !predicate(state) {
                return false;
            }
            let elapsed_ms = state
                .since()
                .map(|since| (now() - since).num_milliseconds());
            state.hide();
            self.inner.listeners.enqueue(state.clone());
            hidden = Some((state.attempt(), elapsed_ms));
            true
        });

        match hidden {
            Some((attempt, elapsed_ms)) => {
                tracing::debug!(attempt, elapsed_ms, "navigation loading hidden");
                self.inner.listeners.flush();
                true
            }
            None => false,
        }
    }
}

impl LoadingControl for LoadingStore {
    fn show_loading(&self, message: Option<&str>) {
        let message = message.unwrap_or(&self.inner.default_message).to_owned();
        let mut snapshot = LoadingState::default();
        self.inner.state.send_modify(|state| {
            state.show(message, now());
            snapshot = state.clone();
            self.inner.listeners.enqueue(state.clone());
        });

        tracing::debug!(
            attempt = snapshot.attempt(),
            text = snapshot.message(),
            "navigation loading shown"
        );
        self.inner.listeners.flush();
    }

    fn hide_loading(&self) {
        if !self.hide_where(|_| true) {
            tracing::trace!("navigation loading already hidden");
        }
    }
}

impl std::fmt::Debug for LoadingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingStore")
            .field("state", &*self.inner.state.borrow())
            .field("default_message", &self.inner.default_message)
            .field("listeners", &self.inner.listeners.len())
            .finish()
    }
}

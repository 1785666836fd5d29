//! Auto-hide watchdog for navigations whose route never commits.
//!
//! Without it, an intent followed by a navigation that fails upstream (or
//! is abandoned) leaves the indicator up forever. The watchdog hides it once
//! the same intent has been loading for the configured timeout. A newer
//! intent re-arms the timer; a hide disarms it.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use navloader_domain::loading::LoadingState;

use crate::loading_store::LoadingStore;

/// Handle to a running watchdog task. Dropping it stops the task.
#[derive(Debug)]
pub struct LoadingWatchdog {
    task: JoinHandle<()>,
    timeout: Duration,
}

impl LoadingWatchdog {
    /// Spawn the watchdog on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    #[must_use]
    pub fn spawn(store: LoadingStore, timeout: Duration) -> Self {
        let rx = store.watch();
        let task = tokio::spawn(run(store, rx, timeout));
        tracing::debug!(?timeout, "loading watchdog started");
        Self { task, timeout }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Stop the task now.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for LoadingWatchdog {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(store: LoadingStore, mut rx: watch::Receiver<LoadingState>, timeout: Duration) {
    loop {
        let armed = {
            let state = rx.borrow_and_update();
            state.is_loading().then_some(state.attempt())
        };

        let Some(attempt) = armed else {
            if rx.changed().await.is_err() {
                return;
            }
            continue;
        };

        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    return;
                }
            }
            () = tokio::time::sleep(timeout) => {
                if store.hide_if_attempt(attempt) {
                    tracing::warn!(
                        attempt,
                        ?timeout,
                        "route never committed, auto-hiding navigation loading"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::LoadingControl;

    const TIMEOUT: Duration = Duration::from_millis(1_000);

    #[tokio::test(start_paused = true)]
    async fn should_hide_after_timeout() {
        let store = LoadingStore::new();
        let _watchdog = LoadingWatchdog::spawn(store.clone(), TIMEOUT);

        store.show_loading(Some("Loading..."));
        tokio::time::sleep(TIMEOUT + Duration::from_millis(1)).await;

        assert!(!store.state().is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_loading_before_timeout() {
        let store = LoadingStore::new();
        let _watchdog = LoadingWatchdog::spawn(store.clone(), TIMEOUT);

        store.show_loading(None);
        tokio::time::sleep(TIMEOUT / 2).await;

        assert!(store.state().is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn should_rearm_on_newer_intent() {
        let store = LoadingStore::new();
        let _watchdog = LoadingWatchdog::spawn(store.clone(), TIMEOUT);

        store.show_loading(Some("A"));
        tokio::time::sleep(TIMEOUT / 2).await;
        store.show_loading(Some("B"));
        tokio::time::sleep(TIMEOUT / 2 + Duration::from_millis(1)).await;

        assert_eq!(store.state().message(), Some("B"));

        tokio::time::sleep(TIMEOUT / 2).await;
        assert!(!store.state().is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_touch_state_after_regular_hide() {
        let store = LoadingStore::new();
        let _watchdog = LoadingWatchdog::spawn(store.clone(), TIMEOUT);

        store.show_loading(Some("A"));
        tokio::time::sleep(TIMEOUT / 4).await;
        store.hide_loading();
        let attempt = store.state().attempt();
        tokio::time::sleep(TIMEOUT * 2).await;

        assert!(!store.state().is_loading());
        assert_eq!(store.state().attempt(), attempt);
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_when_dropped() {
        let store = LoadingStore::new();
        let watchdog = LoadingWatchdog::spawn(store.clone(), TIMEOUT);
        assert_eq!(watchdog.timeout(), TIMEOUT);
        watchdog.stop();

        store.show_loading(None);
        tokio::time::sleep(TIMEOUT * 2).await;

        assert!(store.state().is_loading());
    }
}

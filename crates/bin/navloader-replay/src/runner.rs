//! Replays a [`Script`] through a fresh navigation session.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;

use navloader_app::session::NavigationSession;
use navloader_app::watchdog::LoadingWatchdog;
use navloader_domain::loading::LoadingState;

use crate::config::Config;
use crate::script::{Script, Step};

/// Outcome of a replay, printed as JSON by the binary.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    /// Every state the indicator was asked to render, in order.
    pub transitions: Vec<LoadingState>,
    /// Number of transitions back to idle.
    pub hides: usize,
    pub final_state: LoadingState,
}

/// Run `script` against a session configured by `config`.
pub async fn replay(script: &Script, config: &Config) -> ReplayReport {
    let session = NavigationSession::new(
        script.initial_route.clone(),
        config.loading.default_message.clone(),
    );
    let _watchdog = config
        .watchdog_timeout()
        .map(|timeout| LoadingWatchdog::spawn(session.store().clone(), timeout));

    let transitions = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&transitions);
    let subscription = session.store().subscribe(move |state| {
        tracing::info!(
            loading = state.is_loading(),
            text = state.message(),
            attempt = state.attempt(),
            "indicator updated"
        );
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(state.clone());
    });

    for (index, step) in script.steps.iter().enumerate() {
        tracing::info!(index, ?step, "replaying step");
        match step {
            Step::Intent { message } => {
                session
                    .intent()
                    .request_navigation_feedback(message.as_deref());
            }
            Step::Commit { route } => {
                session.routes().commit(route.clone());
            }
            Step::Wait { ms } => tokio::time::sleep(Duration::from_millis(*ms)).await,
        }
    }

    subscription.unsubscribe();
    let transitions = std::mem::take(
        &mut *transitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner),
    );
    let hides = transitions.iter().filter(|state| !state.is_loading()).count();

    ReplayReport {
        transitions,
        hides,
        final_state: session.store().state(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(steps: Vec<Step>) -> Script {
        Script {
            initial_route: "/home".into(),
            steps,
        }
    }

    fn intent(message: &str) -> Step {
        Step::Intent {
            message: Some(message.to_string()),
        }
    }

    fn commit(route: &str) -> Step {
        Step::Commit {
            route: route.into(),
        }
    }

    #[tokio::test]
    async fn should_report_idle_for_empty_script() {
        let report = replay(&script(vec![]), &Config::default()).await;
        assert!(report.transitions.is_empty());
        assert!(!report.final_state.is_loading());
    }

    #[tokio::test]
    async fn should_record_show_then_hide() {
        let report = replay(
            &script(vec![intent("Loading products"), commit("/products")]),
            &Config::default(),
        )
        .await;

        assert_eq!(report.transitions.len(), 2);
        assert_eq!(report.transitions[0].message(), Some("Loading products"));
        assert_eq!(report.hides, 1);
        assert!(!report.final_state.is_loading());
    }

    #[tokio::test]
    async fn should_stay_loading_on_same_route_commit() {
        let report = replay(&script(vec![intent("A"), commit("/home")]), &Config::default()).await;

        assert_eq!(report.hides, 0);
        assert!(report.final_state.is_loading());
    }

    #[tokio::test]
    async fn should_use_configured_default_message() {
        let mut config = Config::default();
        config.loading.default_message = "Please wait".to_string();

        let report = replay(&script(vec![Step::Intent { message: None }]), &config).await;

        assert_eq!(report.final_state.message(), Some("Please wait"));
    }

    #[tokio::test(start_paused = true)]
    async fn should_auto_hide_when_watchdog_configured() {
        let mut config = Config::default();
        config.watchdog.timeout_ms = Some(100);

        let report = replay(
            &script(vec![intent("A"), Step::Wait { ms: 150 }]),
            &config,
        )
        .await;

        assert_eq!(report.hides, 1);
        assert!(!report.final_state.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_loading_without_watchdog() {
        let report = replay(
            &script(vec![intent("A"), Step::Wait { ms: 10_000 }]),
            &Config::default(),
        )
        .await;

        assert!(report.final_state.is_loading());
    }

    #[tokio::test]
    async fn should_serialize_report() {
        let report = replay(
            &script(vec![intent("A"), commit("/products")]),
            &Config::default(),
        )
        .await;

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["hides"], 1);
        assert_eq!(json["final_state"]["is_loading"], false);
        assert_eq!(json["transitions"][0]["message"], "A");
    }
}

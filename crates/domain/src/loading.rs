//! Loading state — whether a navigation is in flight, and what to tell the user.
//!
//! One [`LoadingState`] exists per UI session. It starts idle, becomes
//! loading on every navigation intent and goes back to idle once the
//! destination route commits.
//!
//! The message and the start timestamp are present exactly while loading;
//! the mutators below are the only way to change the state, so the
//! invariant cannot be broken from outside.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ValidationError;

/// Message shown when an intent does not supply one.
pub const DEFAULT_LOADING_MESSAGE: &str = "Loading\u{2026}";

/// UTC timestamp of the most recent navigation intent.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Coarse state-machine position of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
}

/// Snapshot of the navigation loading indicator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LoadingState {
    is_loading: bool,
    message: Option<String>,
    since: Option<Timestamp>,
    attempt: u64,
}

impl LoadingState {
    /// Whether a navigation is currently in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message to display; `Some` iff [`is_loading`](Self::is_loading).
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// When the latest intent was recorded; `Some` iff loading.
    #[must_use]
    pub fn since(&self) -> Option<Timestamp> {
        self.since
    }

    /// Number of intents recorded in this session.
    ///
    /// Hiding never changes it, so two snapshots with the same attempt and
    /// both loading belong to the same intent.
    #[must_use]
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else {
            Phase::Idle
        }
    }

    /// Record a navigation intent.
    ///
    /// Calling this while already loading replaces the message and the
    /// timestamp; nothing is stacked.
    pub fn show(&mut self, message: impl Into<String>, at: Timestamp) {
        self.is_loading = true;
        self.message = Some(message.into());
        self.since = Some(at);
        self.attempt = self.attempt.wrapping_add(1);
    }

    /// Return to idle. Returns `false` when already idle.
    pub fn hide(&mut self) -> bool {
        if !self.is_loading {
            return false;
        }
        self.is_loading = false;
        self.message = None;
        self.since = None;
        true
    }
}

/// Check that a message can be displayed.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyMessage`] when `message` is blank.
pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.trim().is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    Ok(())
}

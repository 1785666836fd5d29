//! Navigation scripts — a recorded sequence of intents, route commits and pauses.
//!
//! ```toml
//! initial_route = "/home"
//!
//! [[step]]
//! kind = "intent"
//! message = "Loading products"
//!
//! [[step]]
//! kind = "wait"
//! ms = 300
//!
//! [[step]]
//! kind = "commit"
//! route = "/products"
//! ```

use std::path::Path;

use serde::Deserialize;

use navloader_domain::route::RouteIdentity;

/// A full replayable session.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub initial_route: RouteIdentity,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// One thing that happens during a session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// A trigger element requests navigation feedback.
    Intent {
        #[serde(default)]
        message: Option<String>,
    },
    /// The router commits a route.
    Commit { route: RouteIdentity },
    /// Time passes before the next step.
    Wait { ms: u64 },
}

impl Script {
    /// Parse a script from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Parse`] when the text is not a valid script.
    pub fn parse(content: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Io`] when the file cannot be read, or
    /// [`ScriptError::Parse`] when its content is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}

/// Script loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to parse navigation script")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read navigation script")]
    Io(#[from] std::io::Error),
}

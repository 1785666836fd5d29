//! # navloader-replay
//!
//! Composition root that wires a navigation session together and replays a
//! navigation script through it.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise `tracing`
//! - Parse the navigation script given as the first argument
//! - Replay it, logging every indicator transition
//! - Print a JSON report of the transitions to stdout
//!
//! ## Dependency rule
//! This is the wiring layer — no coordination logic belongs here.

mod config;
mod runner;
mod script;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::script::Script;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: navloader-replay <script.toml>")?;
    let script = Script::from_file(&path).with_context(|| format!("loading script {path}"))?;

    tracing::info!(
        %path,
        steps = script.steps.len(),
        initial_route = %script.initial_route,
        "replaying navigation script"
    );
    let report = runner::replay(&script, &config).await;

    let json = serde_json::to_string_pretty(&report).context("serializing replay report")?;
    println!("{json}");
    Ok(())
}

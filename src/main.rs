//! login-ingest: drain one batch of login events into `user_logins`.
//!
//! # Usage
//!
//! ```bash
//! login-ingest --database ./user_logins.db --queue-endpoint http://localhost:4566
//! login-ingest show --output json
//! login-ingest purge
//! ```
//!
//! Environment variables can also be used:
//! - `LOGIN_INGEST_DATABASE`: SQLite database path
//! - `LOGIN_INGEST_QUEUE`: Queue name
//! - `LOGIN_INGEST_QUEUE_ENDPOINT`: Queue endpoint override
//! - `RUST_LOG`: Log level (trace, debug, info, warn, error)
//!
//! Queue credentials and region come from the standard AWS environment.
//! The exit status is non-zero when the run fails.

mod commands;

use anyhow::Result;
use login_ingest::config::{Command, Config};
use login_ingest::observability::tracing::init_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse configuration from CLI arguments and environment
    let config = Config::parse_args();

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    match config.selected_command() {
        Command::Run => {
            let summary = commands::run::run(&config).await?;
            tracing::debug!(skipped = summary.skipped(), "Exiting");
        }
        Command::Show { output } => commands::show::run(&config, output)?,
        Command::Purge => commands::purge::run(&config)?,
    }

    Ok(())
}

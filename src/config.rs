//! Configuration parsing for login-ingest.
//!
//! Supports:
//! - CLI arguments via clap
//! - Environment variable overrides
//! - Defaults that match a local SQS emulator setup

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::PipelineOptions;
use crate::queue::{QueueConfig, DEFAULT_QUEUE_NAME};
use crate::storage::StoreConfig;

/// login-ingest: drain login events from a queue into `user_logins`.
#[derive(Parser, Debug, Clone)]
#[command(name = "login-ingest")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// SQLite database holding the user_logins table
    #[arg(short, long, env = "LOGIN_INGEST_DATABASE", default_value = "./user_logins.db")]
    pub database: PathBuf,

    /// Name of the queue to drain (created if absent)
    #[arg(short, long, env = "LOGIN_INGEST_QUEUE", default_value = DEFAULT_QUEUE_NAME)]
    pub queue_name: String,

    /// Queue endpoint override, e.g. http://localhost:4566
    #[arg(long, env = "LOGIN_INGEST_QUEUE_ENDPOINT")]
    pub queue_endpoint: Option<String>,

    /// Messages requested per run (1-10)
    #[arg(long, env = "LOGIN_INGEST_MAX_MESSAGES", default_value_t = 10)]
    pub max_messages: i32,

    /// Seconds to wait for the first message (0-20)
    #[arg(long, env = "LOGIN_INGEST_WAIT_SECONDS", default_value_t = 5)]
    pub wait_seconds: i32,

    /// Delete each message from the queue after its row is inserted
    #[arg(long, env = "LOGIN_INGEST_ACK_ON_SUCCESS")]
    pub ack_on_success: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch one batch and store it (the default)
    Run,
    /// Print every stored record
    Show {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },
    /// Delete every stored record
    Purge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format: {s}")),
        }
    }
}

impl Config {
    /// Parse configuration from CLI arguments and environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The subcommand to execute, `run` when none was given.
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }

    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig {
            queue_name: self.queue_name.clone(),
            endpoint_url: self.queue_endpoint.clone(),
            max_messages: self.max_messages,
            wait_seconds: self.wait_seconds,
        }
        .clamped()
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.database)
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            ack_on_success: self.ack_on_success,
        }
    }

    /// Create a default configuration for testing.
    #[cfg(test)]
    pub fn test_config(database: PathBuf) -> Self {
        Self {
            database,
            queue_endpoint: Some("http://localhost:4566".into()),
            wait_seconds: 0,
            log_level: "debug".into(),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("./user_logins.db"),
            queue_name: DEFAULT_QUEUE_NAME.into(),
            queue_endpoint: None,
            max_messages: 10,
            wait_seconds: 5,
            ack_on_success: false,
            log_level: "info".into(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.queue_name, "login-queue");
        assert_eq!(config.max_messages, 10);
        assert_eq!(config.wait_seconds, 5);
        assert!(!config.ack_on_success);
        assert_eq!(config.selected_command(), Command::Run);
    }

    #[test]
    fn test_parse_defaults_match_default_impl() {
        let parsed = Config::try_parse_from(["login-ingest"]).unwrap();
        let default = Config::default();
        assert_eq!(parsed.queue_name, default.queue_name);
        assert_eq!(parsed.database, default.database);
        assert_eq!(parsed.max_messages, default.max_messages);
        assert_eq!(parsed.wait_seconds, default.wait_seconds);
    }

    #[test]
    fn test_parse_show_json() {
        let config = Config::try_parse_from(["login-ingest", "show", "--output", "json"]).unwrap();
        assert_eq!(
            config.selected_command(),
            Command::Show {
                output: OutputFormat::Json
            }
        );
    }

    #[test]
    fn test_parse_purge_with_database() {
        let config =
            Config::try_parse_from(["login-ingest", "--database", "/tmp/x.db", "purge"]).unwrap();
        assert_eq!(config.selected_command(), Command::Purge);
        assert_eq!(config.store_config().path, PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn test_queue_config_is_clamped() {
        let config = Config {
            max_messages: 100,
            wait_seconds: 90,
            ..Config::test_config(PathBuf::from("test.db"))
        };
        let queue = config.queue_config();
        assert_eq!(queue.max_messages, 10);
        assert_eq!(queue.wait_seconds, 20);
        assert_eq!(queue.endpoint_url.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn test_unknown_output_format() {
        assert!(Config::try_parse_from(["login-ingest", "show", "--output", "xml"]).is_err());
    }
}

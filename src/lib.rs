//! login-ingest: a one-shot batch job for login events.
//!
//! Each invocation drains at most one batch from a work queue, masks the
//! personally identifiable fields of every message and appends the result to
//! the `user_logins` table. Repeated invocations (from cron or any other
//! scheduler) are the mechanism for continuous draining.
//!
//! # Architecture
//!
//! - **Fetch**: long-poll one bounded batch from an SQS-compatible queue
//! - **Transform**: replace `ip` and `device_id` with SHA-512 digests
//! - **Persist**: one SQLite connection per store operation
//!
//! Delivery is at-least-once and nothing is deduplicated, so a redelivered
//! message produces a second row.
//!
//! # Modules
//!
//! - [`anonymize`]: PII masking and version reduction
//! - [`config`]: CLI and environment configuration
//! - [`model`]: raw event and persisted record types
//! - [`observability`]: tracing setup
//! - [`pipeline`]: single-pass orchestration
//! - [`queue`]: message source trait and SQS consumer
//! - [`storage`]: SQLite record store

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions, // queue::QueueConfig is fine
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::needless_raw_string_hashes // r#""# is fine for SQL
)]

pub mod anonymize;
pub mod config;
pub mod model;
pub mod observability;
pub mod pipeline;
pub mod queue;
pub mod storage;

use chrono::{Local, NaiveDate};
use uuid::Uuid;

/// Generate a new UUIDv7 (time-sortable) run ID.
///
/// # Example
///
/// ```
/// let id = login_ingest::generate_run_id();
/// assert!(id.len() == 36); // UUID string format
/// ```
#[must_use]
pub fn generate_run_id() -> String {
    Uuid::now_v7().to_string()
}

/// The process-local calendar date, used to stamp `create_date`.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

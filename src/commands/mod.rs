//! Subcommand implementations for the login-ingest binary.

pub mod purge;
pub mod run;
pub mod show;

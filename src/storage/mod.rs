//! SQLite storage layer for login records.
//!
//! Provides:
//! - Schema initialization for the `user_logins` table
//! - A record store that opens one connection per operation

pub mod schema;
pub mod store;

pub use store::{RecordStore, StoreConfig, StoreError};

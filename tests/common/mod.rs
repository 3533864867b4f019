//! Test utilities shared by the integration tests.
//!
//! Provides:
//! - Temporary database fixtures
//! - An in-memory message source with redelivery semantics
//! - Login event builders

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use login_ingest::queue::{Envelope, MessageSource, QueueError, MAX_BATCH_SIZE};
use login_ingest::storage::{RecordStore, StoreConfig};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Test fixture that manages a temporary database directory.
///
/// The directory is automatically cleaned up when the fixture is dropped.
pub struct TestFixture {
    /// Temporary directory for test database
    pub temp_dir: TempDir,
    /// Path to the database file
    pub db_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with a temporary database directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        Self { temp_dir, db_path }
    }

    /// A record store backed by the fixture database.
    pub fn store(&self) -> RecordStore {
        RecordStore::new(StoreConfig::new(&self.db_path))
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory queue.
///
/// Like SQS with an expired visibility timeout, fetching does not remove
/// anything: every fetch sees the same messages until they are acknowledged.
#[derive(Default)]
pub struct InMemoryQueue {
    pending: Mutex<Vec<Envelope>>,
    acknowledged: Mutex<Vec<String>>,
    unreachable: bool,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue whose every request fails.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// Enqueue a raw body.
    pub fn push_body(&self, body: impl Into<String>) {
        let mut pending = self.pending.lock().unwrap();
        let n = pending.len() + self.acknowledged.lock().unwrap().len();
        pending.push(Envelope {
            message_id: format!("msg-{n}"),
            receipt_handle: Some(format!("receipt-{n}")),
            body: body.into(),
        });
    }

    /// Enqueue a JSON body.
    pub fn push_json(&self, body: Value) {
        self.push_body(body.to_string());
    }

    pub fn pending_len(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    pub fn acknowledged(&self) -> Vec<String> {
        self.acknowledged.lock().unwrap().clone()
    }
}

impl MessageSource for InMemoryQueue {
    async fn fetch_batch(&self) -> Result<Vec<Envelope>, QueueError> {
        if self.unreachable {
            return Err(QueueError::Request("connection refused".into()));
        }
        let pending = self.pending.lock().unwrap();
        Ok(pending.iter().take(MAX_BATCH_SIZE as usize).cloned().collect())
    }

    async fn acknowledge(&self, envelope: &Envelope) -> Result<(), QueueError> {
        if self.unreachable {
            return Err(QueueError::Request("connection refused".into()));
        }
        self.pending
            .lock()
            .unwrap()
            .retain(|e| e.message_id != envelope.message_id);
        self.acknowledged
            .lock()
            .unwrap()
            .push(envelope.message_id.clone());
        Ok(())
    }
}

/// A complete login event.
pub fn login_event(user_id: Value, ip: &str, device_id: &str, app_version: &str) -> Value {
    json!({
        "user_id": user_id,
        "device_type": "ios",
        "ip": ip,
        "device_id": device_id,
        "locale": "en-US",
        "app_version": app_version,
    })
}

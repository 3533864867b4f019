//! Work queue access.
//!
//! The pipeline only sees the [`MessageSource`] trait; [`QueueConsumer`] is
//! the SQS-backed implementation used by the binary.

mod sqs;

pub use sqs::QueueConsumer;

use thiserror::Error;

use crate::model::{DecodeError, LoginEvent};

/// Queue consumed when no name is configured.
pub const DEFAULT_QUEUE_NAME: &str = "login-queue";

/// Upper bound on messages per receive call (the SQS service limit).
pub const MAX_BATCH_SIZE: i32 = 10;

/// Upper bound on the long-poll window in seconds (the SQS service limit).
pub const MAX_WAIT_SECONDS: i32 = 20;

/// Error type for queue operations.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("queue request failed: {0}")]
    Request(String),

    #[error("queue {0} did not return a URL")]
    MissingQueueUrl(String),

    #[error("message {0} has no receipt handle")]
    MissingReceipt(String),
}

/// Queue settings handed to the consumer at construction.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Logical queue name, created if absent
    pub queue_name: String,
    /// Endpoint override, e.g. a local SQS emulator
    pub endpoint_url: Option<String>,
    /// Messages requested per receive call (1..=10)
    pub max_messages: i32,
    /// Long-poll window in seconds (0..=20)
    pub wait_seconds: i32,
}

impl QueueConfig {
    /// Clamp batch size and wait window to what the service accepts.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.max_messages = self.max_messages.clamp(1, MAX_BATCH_SIZE);
        self.wait_seconds = self.wait_seconds.clamp(0, MAX_WAIT_SECONDS);
        self
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            queue_name: DEFAULT_QUEUE_NAME.into(),
            endpoint_url: None,
            max_messages: MAX_BATCH_SIZE,
            wait_seconds: 5,
        }
    }
}

/// One received message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Service-assigned message ID
    pub message_id: String,
    /// Handle needed to delete the message, if the source supports it
    pub receipt_handle: Option<String>,
    /// Raw message body
    pub body: String,
}

impl Envelope {
    /// Decode the body as a login event.
    pub fn decode(&self) -> Result<LoginEvent, DecodeError> {
        LoginEvent::decode(&self.body)
    }
}

/// Something that hands out batches of messages.
///
/// Messages are never removed by fetching; only [`acknowledge`] removes one.
///
/// [`acknowledge`]: MessageSource::acknowledge
#[allow(async_fn_in_trait)]
pub trait MessageSource {
    /// Fetch up to one batch, waiting a bounded time for the first message.
    /// An empty vector means nothing arrived within the window.
    async fn fetch_batch(&self) -> Result<Vec<Envelope>, QueueError>;

    /// Remove a processed message from the queue.
    async fn acknowledge(&self, envelope: &Envelope) -> Result<(), QueueError>;
}

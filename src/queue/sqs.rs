//! SQS-backed message source.

use aws_config::BehaviorVersion;
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::types::Message;
use aws_sdk_sqs::Client;

use super::{Envelope, MessageSource, QueueConfig, QueueError};

/// Consumer for a single named SQS queue.
///
/// The queue URL is resolved once, at construction.
pub struct QueueConsumer {
    client: Client,
    queue_url: String,
    config: QueueConfig,
}

impl QueueConsumer {
    /// Load credentials and region from the environment and resolve the queue.
    pub async fn connect(config: QueueConfig) -> Result<Self, QueueError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }
        let sdk_config = loader.load().await;
        Self::with_client(Client::new(&sdk_config), config).await
    }

    /// Resolve the queue with an existing client, creating it if absent.
    pub async fn with_client(client: Client, config: QueueConfig) -> Result<Self, QueueError> {
        let config = config.clamped();

        let output = client
            .create_queue()
            .queue_name(&config.queue_name)
            .send()
            .await
            .map_err(request_error)?;

        let queue_url = output
            .queue_url()
            .map(str::to_string)
            .ok_or_else(|| QueueError::MissingQueueUrl(config.queue_name.clone()))?;

        tracing::debug!(queue = %config.queue_name, url = %queue_url, "Queue resolved");

        Ok(Self {
            client,
            queue_url,
            config,
        })
    }

    /// URL of the resolved queue.
    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }

    /// Name the queue was resolved from.
    pub fn queue_name(&self) -> &str {
        &self.config.queue_name
    }
}

impl MessageSource for QueueConsumer {
    #[tracing::instrument(skip(self), fields(queue = %self.config.queue_name))]
    async fn fetch_batch(&self) -> Result<Vec<Envelope>, QueueError> {
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(self.config.max_messages)
            .wait_time_seconds(self.config.wait_seconds)
            .send()
            .await
            .map_err(request_error)?;

        let batch: Vec<Envelope> = output.messages().iter().map(envelope_from).collect();

        tracing::debug!(count = batch.len(), "Batch received");
        Ok(batch)
    }

    async fn acknowledge(&self, envelope: &Envelope) -> Result<(), QueueError> {
        let receipt = envelope
            .receipt_handle
            .as_deref()
            .ok_or_else(|| QueueError::MissingReceipt(envelope.message_id.clone()))?;

        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt)
            .send()
            .await
            .map_err(request_error)?;

        tracing::debug!(message_id = %envelope.message_id, "Message deleted");
        Ok(())
    }
}

fn envelope_from(message: &Message) -> Envelope {
    Envelope {
        message_id: message.message_id().unwrap_or("unknown").to_string(),
        receipt_handle: message.receipt_handle().map(str::to_string),
        body: message.body().unwrap_or_default().to_string(),
    }
}

fn request_error<E: std::error::Error>(err: E) -> QueueError {
    QueueError::Request(DisplayErrorContext(err).to_string())
}

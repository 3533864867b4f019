//! Single-pass ingestion: fetch one batch, mask each message, insert.
//!
//! Per-message problems (undecodable body, missing fields, bad version)
//! skip that message and move on. Queue and store failures end the run;
//! whatever was not processed stays on the queue for the next invocation.

use chrono::NaiveDate;
use thiserror::Error;

use crate::anonymize::anonymize;
use crate::queue::{Envelope, MessageSource, QueueError};
use crate::storage::{RecordStore, StoreError};

/// Run-level failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Pipeline behavior switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// Delete a message from the queue once its row is inserted.
    ///
    /// Off by default: messages are left to the queue's visibility timeout
    /// and may be delivered, and inserted, again.
    pub ack_on_success: bool,
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Messages in the fetched batch
    pub received: usize,
    /// Rows written
    pub inserted: usize,
    /// Messages without `ip` or `device_id`
    pub rejected: usize,
    /// Bodies that could not be decoded as a login event
    pub decode_failed: usize,
    /// Messages missing a pass-through field or with a bad version
    pub invalid: usize,
    /// Messages deleted from the queue
    pub acknowledged: usize,
}

/// What happened to one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Inserted,
    Rejected,
    DecodeFailed,
    Invalid,
}

impl RunSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Inserted => self.inserted += 1,
            Outcome::Rejected => self.rejected += 1,
            Outcome::DecodeFailed => self.decode_failed += 1,
            Outcome::Invalid => self.invalid += 1,
        }
    }

    /// Messages that produced no row.
    pub fn skipped(&self) -> usize {
        self.rejected + self.decode_failed + self.invalid
    }
}

/// Fetch → anonymize → persist, once per call.
pub struct IngestionPipeline<S> {
    source: S,
    store: RecordStore,
    options: PipelineOptions,
}

impl<S: MessageSource> IngestionPipeline<S> {
    pub fn new(source: S, store: RecordStore, options: PipelineOptions) -> Self {
        Self {
            source,
            store,
            options,
        }
    }

    /// The message source this pipeline drains.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Process one batch, stamping records with today's local date.
    pub async fn run_once(&self) -> Result<RunSummary, PipelineError> {
        self.run_once_on(crate::today()).await
    }

    /// Process one batch, stamping records with `today`.
    #[tracing::instrument(skip(self), fields(run_id = %crate::generate_run_id()))]
    pub async fn run_once_on(&self, today: NaiveDate) -> Result<RunSummary, PipelineError> {
        let batch = self.source.fetch_batch().await?;
        let mut summary = RunSummary {
            received: batch.len(),
            ..RunSummary::default()
        };

        if batch.is_empty() {
            tracing::info!("No messages available");
            return Ok(summary);
        }

        for envelope in &batch {
            let outcome = self.process(envelope, today)?;
            summary.record(outcome);

            if outcome == Outcome::Inserted && self.options.ack_on_success {
                self.source.acknowledge(envelope).await?;
                summary.acknowledged += 1;
            }
        }

        tracing::info!(
            received = summary.received,
            inserted = summary.inserted,
            rejected = summary.rejected,
            decode_failed = summary.decode_failed,
            invalid = summary.invalid,
            acknowledged = summary.acknowledged,
            "Run complete"
        );
        Ok(summary)
    }

    fn process(&self, envelope: &Envelope, today: NaiveDate) -> Result<Outcome, StoreError> {
        let event = match envelope.decode() {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(message_id = %envelope.message_id, error = %e, "Skipping undecodable message");
                return Ok(Outcome::DecodeFailed);
            }
        };

        let record = match anonymize(&event, today) {
            Ok(record) => record,
            Err(e) if e.is_silent() => return Ok(Outcome::Rejected),
            Err(e) => {
                tracing::warn!(message_id = %envelope.message_id, error = %e, "Skipping invalid message");
                return Ok(Outcome::Invalid);
            }
        };

        self.store.insert(&record)?;
        tracing::debug!(message_id = %envelope.message_id, "Record inserted");
        Ok(Outcome::Inserted)
    }
}

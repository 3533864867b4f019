//! Run command: one fetch → anonymize → persist pass.

use anyhow::{Context, Result};
use login_ingest::config::Config;
use login_ingest::pipeline::{IngestionPipeline, RunSummary};
use login_ingest::queue::QueueConsumer;
use login_ingest::storage::RecordStore;

pub async fn run(config: &Config) -> Result<RunSummary> {
    let queue = config.queue_config();
    let consumer = QueueConsumer::connect(queue.clone())
        .await
        .with_context(|| format!("failed to resolve queue {}", queue.queue_name))?;
    tracing::debug!(queue = consumer.queue_name(), url = consumer.queue_url(), "Draining queue");

    let store = RecordStore::new(config.store_config());
    let pipeline = IngestionPipeline::new(consumer, store, config.pipeline_options());

    let summary = pipeline.run_once().await.context("ingest run failed")?;
    Ok(summary)
}

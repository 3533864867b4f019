//! Purge command: delete every stored record.

use anyhow::{Context, Result};
use login_ingest::config::Config;
use login_ingest::storage::RecordStore;

pub fn run(config: &Config) -> Result<()> {
    let store = RecordStore::new(config.store_config());
    let deleted = store
        .delete_all()
        .with_context(|| format!("failed to purge {}", store.path().display()))?;

    tracing::info!(deleted, "Records purged");
    println!("Deleted {deleted} record(s)");
    Ok(())
}

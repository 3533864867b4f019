//! Show command: print every stored record.

use anyhow::{Context, Result};
use login_ingest::config::{Config, OutputFormat};
use login_ingest::model::LoginRecord;
use login_ingest::storage::RecordStore;
use serde::Serialize;

#[derive(Serialize)]
struct RecordsOutput {
    records: Vec<LoginRecord>,
    total: usize,
}

pub fn run(config: &Config, format: OutputFormat) -> Result<()> {
    let store = RecordStore::new(config.store_config());
    let records = store
        .read_all()
        .with_context(|| format!("failed to read {}", store.path().display()))?;

    let output = RecordsOutput {
        total: records.len(),
        records,
    };

    match format {
        OutputFormat::Text => {
            if output.records.is_empty() {
                println!("No records found.");
            } else {
                println!(
                    "{:<38} {:<10} {:<18} {:<18} {:<8} {:>7} {:>12}",
                    "USER ID", "DEVICE", "MASKED IP", "MASKED DEVICE", "LOCALE", "VERSION", "CREATED"
                );
                println!("{}", "-".repeat(117));
                for r in &output.records {
                    println!(
                        "{:<38} {:<10} {:<18} {:<18} {:<8} {:>7} {:>12}",
                        r.user_id,
                        r.device_type,
                        abbreviate(&r.masked_ip),
                        abbreviate(&r.masked_device_id),
                        r.locale,
                        r.app_version,
                        r.create_date
                    );
                }
                println!();
                println!("Total: {} record(s)", output.total);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

// Digests are 128 hex chars; the prefix is enough to tell rows apart.
fn abbreviate(digest: &str) -> String {
    match digest.get(..16) {
        Some(prefix) if digest.len() > 16 => format!("{prefix}.."),
        _ => digest.to_string(),
    }
}

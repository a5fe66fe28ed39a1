// larder/src/commands/sync.rs
//
// USE CASE: Refresh the reference food catalog.

use std::path::Path;
use std::time::Duration;

use larder_core::application::sync_foods;
use larder_core::infrastructure::adapters::feed::JsonFeedSource;

use super::Larder;

pub async fn execute(data_dir: &Path, feed: &Path, retries: Option<u32>) -> anyhow::Result<()> {
    let larder = Larder::open(data_dir)?;
    let source = JsonFeedSource::new(feed);

    let report = sync_foods(
        &source,
        &larder.store,
        retries.unwrap_or(larder.config.sync.retries),
        Duration::from_millis(larder.config.sync.backoff_ms),
    )
    .await?;

    println!(
        "🔄 Synced {} foods in {} attempt(s)",
        report.merged, report.attempts
    );
    let unknown = source.stats().unknown_units() + source.stats().unknown_categories();
    if unknown > 0 {
        println!("⚠️  {} unrecognised unit/category labels stored as unknown", unknown);
    }
    Ok(())
}

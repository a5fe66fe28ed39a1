// larder-core/src/application/sync.rs

use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::LarderError;
use crate::ports::catalog::FoodCatalog;
use crate::ports::remote::RemoteFoodSource;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub attempts: u32,
    pub fetched: usize,
    pub merged: usize,
}

/// Refreshes the local food table from `remote`. The fetch is retried up to
/// `retries` extra times, waiting `backoff` and doubling it between
/// attempts. Remote ids are kept apart from local ids: each food is merged
/// onto the local food it is linked to, or that carries its name.
#[instrument(skip(remote, local))]
pub async fn sync_foods(
    remote: &dyn RemoteFoodSource,
    local: &dyn FoodCatalog,
    retries: u32,
    backoff: Duration,
) -> Result<SyncReport, LarderError> {
    let mut report = SyncReport::default();
    let mut delay = backoff;

    let foods = loop {
        report.attempts += 1;
        match remote.fetch_foods().await {
            Ok(foods) => break foods,
            Err(e) if report.attempts <= retries => {
                warn!(attempt = report.attempts, error = %e, "Food fetch failed, retrying");
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
            }
            Err(e) => {
                warn!(attempts = report.attempts, error = %e, "Food fetch failed, giving up");
                return Err(e);
            }
        }
    };

    report.fetched = foods.len();
    for food in &foods {
        let merged = local.merge_remote_food(food).await?;
        debug!(remote_id = food.id, id = merged.id, food = %merged.name, "Food merged");
        report.merged += 1;
    }

    info!(fetched = report.fetched, attempts = report.attempts, "Food catalog synced");
    Ok(report)
}

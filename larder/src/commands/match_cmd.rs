// larder/src/commands/match_cmd.rs
//
// USE CASE: Recipes cookable with the current stock.

use anyhow::Context;
use comfy_table::Table;
use std::path::{Path, PathBuf};

use larder_core::application::{match_stock, resolve_stock};
use larder_core::infrastructure::fs::atomic_write;

use super::Larder;

pub struct MatchOptions {
    pub stock: Option<String>,
    pub max_missing: Option<usize>,
    pub ignore_optional: bool,
    pub out: Option<PathBuf>,
}

pub async fn execute(data_dir: &Path, options: MatchOptions) -> anyhow::Result<()> {
    let larder = Larder::open(data_dir)?;
    let store = &larder.store;

    let mut policy = larder.config.matching.policy;
    if let Some(max_missing) = options.max_missing {
        policy = policy.with_max_missing(max_missing);
    }
    if options.ignore_optional {
        policy.optional_counts_as_missing = false;
    }

    let stock_id = match options.stock {
        Some(name) => Some(resolve_stock(store, &name, false).await?.id),
        None => None,
    };

    let matches = match_stock(
        store,
        store,
        stock_id,
        &policy,
        larder.config.matching.fetch_concurrency,
    )
    .await?;

    if let Some(out) = &options.out {
        let json = serde_json::to_string_pretty(&matches)?;
        atomic_write(out, json)
            .with_context(|| format!("Failed to write match report to {}", out.display()))?;
        println!("📝 Report written to {}", out.display());
    }

    if matches.is_empty() {
        println!(
            "No recipe within {} missing ingredients",
            policy.max_missing
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["id", "title", "satisfied", "missing", "minutes"]);
    for m in &matches {
        table.add_row(vec![
            m.recipe.id.to_string(),
            m.recipe.title.clone(),
            m.satisfied.to_string(),
            m.missing_count().to_string(),
            m.recipe.total_minutes().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

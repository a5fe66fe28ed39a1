// larder/src/commands/import.rs
//
// USE CASE: Load foods and recipes from YAML documents.

use anyhow::Context;
use std::path::Path;

use larder_core::infrastructure::import::import_catalog;

use super::Larder;

pub async fn execute(data_dir: &Path, path: &Path) -> anyhow::Result<()> {
    let larder = Larder::open(data_dir)?;

    let report = import_catalog(&larder.store, path)
        .await
        .with_context(|| format!("Failed to import {}", path.display()))?;

    println!(
        "📥 Imported {} foods and {} recipes from {} files ({} already known)",
        report.foods, report.recipes, report.files, report.skipped_recipes
    );
    Ok(())
}

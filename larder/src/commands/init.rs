// larder/src/commands/init.rs
//
// USE CASE: Bootstrap a data directory.

use anyhow::Context;
use std::path::Path;

use larder_core::infrastructure::config::write_default_config;

use super::Larder;

pub fn execute(data_dir: &Path) -> anyhow::Result<()> {
    let config_path = write_default_config(data_dir)
        .with_context(|| format!("Failed to write configuration in {}", data_dir.display()))?;
    println!("⚙️  Configuration: {}", config_path.display());

    let larder = Larder::open(data_dir)?;
    println!(
        "🦆 Database ready: {}",
        larder.config.database_path(data_dir).display()
    );
    Ok(())
}

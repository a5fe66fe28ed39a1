// larder/src/commands/mod.rs

pub mod import;
pub mod init;
pub mod match_cmd;
pub mod routine;
pub mod search;
pub mod stock;
pub mod sync;

use anyhow::Context;
use chrono::NaiveDate;
use comfy_table::Table;
use std::path::Path;
use tracing::{debug, info};

use larder_core::LarderError;
use larder_core::domain::food::FoodCard;
use larder_core::domain::units::{Quantity, convert_to_larger_display_unit};
use larder_core::infrastructure::adapters::duckdb::DuckDBStore;
use larder_core::infrastructure::config::{AppConfig, load_or_default};

use crate::cli::{Cli, Commands};

/// Config and store for one invocation. The store is opened once here and
/// handed to every use case.
pub struct Larder {
    pub config: AppConfig,
    pub store: DuckDBStore,
}

impl Larder {
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let config = load_or_default(data_dir).with_context(|| {
            format!("Failed to load configuration from {}", data_dir.display())
        })?;

        let db_path = config.database_path(data_dir);
        let store = DuckDBStore::open(&db_path)
            .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
        info!(database = %db_path.display(), "Larder opened");

        Ok(Self {
            config,
            store,
        })
    }
}

/// Strict quantity parsing ("250 g", "1,5 kg", "to taste").
pub fn parse_quantity(raw: &str) -> Result<Quantity, LarderError> {
    Ok(raw.parse::<Quantity>()?)
}

/// One table row per card, with quantities shown in the largest fitting unit.
pub fn cards_table(cards: &[FoodCard]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["id", "name", "quantity", "expiry"]);
    for card in cards {
        table.add_row(vec![
            card.id.to_string(),
            card.name.clone(),
            convert_to_larger_display_unit(&card.quantity).to_string(),
            card.expiry.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
        ]);
    }
    table
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    debug!(data_dir = %cli.data_dir.display(), "Dispatching command");
    match cli.command {
        Commands::Init => init::execute(&cli.data_dir),
        Commands::Import { path } => import::execute(&cli.data_dir, &path).await,
        Commands::Stock(cmd) => stock::execute(&cli.data_dir, cmd).await,
        Commands::Match {
            stock,
            max_missing,
            ignore_optional,
            out,
        } => {
            let options = match_cmd::MatchOptions {
                stock,
                max_missing,
                ignore_optional,
                out,
            };
            match_cmd::execute(&cli.data_dir, options).await
        }
        Commands::Search {
            query,
            ranked,
            foods,
        } => {
            if foods {
                search::execute_foods(&cli.data_dir, &query).await
            } else {
                search::execute(&cli.data_dir, &query, ranked).await
            }
        }
        Commands::Routine(cmd) => routine::execute(&cli.data_dir, cmd).await,
        Commands::Sync { feed, retries } => sync::execute(&cli.data_dir, &feed, retries).await,
    }
}

// larder/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Food inventory, restock routines and stock-aware recipe matching", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding larder.yaml and the database
    #[arg(long, global = true, env = "LARDER_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🏁 Writes a default larder.yaml and creates the database
    Init,

    /// 📥 Imports foods and recipes from a YAML file or directory
    Import { path: PathBuf },

    /// 🧺 Manages stocked food cards
    #[command(subcommand)]
    Stock(StockCommand),

    /// 🍳 Lists recipes cookable with what is in stock
    Match {
        /// Only consider this stock
        #[arg(long)]
        stock: Option<String>,

        /// Overrides matching.max_missing
        #[arg(long)]
        max_missing: Option<usize>,

        /// Absent optional ingredients do not count as missing
        #[arg(long)]
        ignore_optional: bool,

        /// Also write the full report as JSON
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// 🔍 Fuzzy recipe title search
    Search {
        query: String,

        /// Order hits by relevance instead of catalog order
        #[arg(long)]
        ranked: bool,

        /// Pick catalog foods instead of recipes
        #[arg(long, conflicts_with = "ranked")]
        foods: bool,
    },

    /// 🔁 Manages restock routines
    #[command(subcommand)]
    Routine(RoutineCommand),

    /// 🔄 Refreshes the food catalog from a JSON feed
    Sync {
        feed: PathBuf,

        /// Overrides sync.retries
        #[arg(long)]
        retries: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum StockCommand {
    /// Adds a food card (ex: `stock add fridge Milk "1 l" --expiry 2026-10-20`)
    Add {
        stock: String,
        food: String,
        quantity: String,

        #[arg(long)]
        expiry: Option<NaiveDate>,

        /// Create the stock if it does not exist
        #[arg(long)]
        create: bool,
    },

    /// Lists the cards of a stock
    List { stock: String },

    /// Finds stocked cards by name
    Find { query: String },

    /// Changes the quantity of a card
    Set { card_id: i64, quantity: String },

    /// Removes a card
    Remove { card_id: i64 },

    /// Deletes a stock and all its cards
    Drop { stock: String },

    /// Lists cards expiring soon
    Expiring {
        #[arg(long, default_value = "3")]
        days: u32,

        /// Reference date (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
pub enum RoutineCommand {
    /// Creates a routine (schedules: daily, every:3, weekly:mon,thu, monthly:15)
    Add {
        name: String,

        #[arg(long)]
        stock: String,

        #[arg(long)]
        schedule: String,

        /// First day the routine may run (default: today)
        #[arg(long)]
        start: Option<NaiveDate>,
    },

    /// Adds a card the routine restocks
    Item {
        routine_id: i64,
        food: String,
        quantity: String,
    },

    /// Lists routines with their next due date
    List,

    /// Runs every routine due today
    Run {
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Deletes a routine and its cards
    Remove { routine_id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_match_defaults() -> Result<()> {
        let args = Cli::parse_from(["larder", "match"]);
        assert_eq!(args.data_dir.to_string_lossy(), ".");
        match args.command {
            Commands::Match {
                stock,
                max_missing,
                ignore_optional,
                out,
            } => {
                assert_eq!(stock, None);
                assert_eq!(max_missing, None);
                assert!(!ignore_optional);
                assert_eq!(out, None);
                Ok(())
            }
            _ => bail!("Expected Match command"),
        }
    }

    #[test]
    fn test_cli_parse_stock_add() -> Result<()> {
        let args = Cli::parse_from([
            "larder",
            "stock",
            "add",
            "fridge",
            "Milk",
            "1 l",
            "--expiry",
            "2026-10-20",
            "--data-dir",
            "/tmp/larder",
        ]);
        assert_eq!(args.data_dir.to_string_lossy(), "/tmp/larder");
        match args.command {
            Commands::Stock(StockCommand::Add {
                stock,
                food,
                quantity,
                expiry,
                create,
            }) => {
                assert_eq!(stock, "fridge");
                assert_eq!(food, "Milk");
                assert_eq!(quantity, "1 l");
                assert_eq!(expiry, NaiveDate::from_ymd_opt(2026, 10, 20));
                assert!(!create);
                Ok(())
            }
            _ => bail!("Expected Stock Add command"),
        }
    }

    #[test]
    fn test_cli_parse_routine_add() -> Result<()> {
        let args = Cli::parse_from([
            "larder",
            "routine",
            "add",
            "veggies",
            "--stock",
            "fridge",
            "--schedule",
            "weekly:mon,thu",
        ]);
        match args.command {
            Commands::Routine(RoutineCommand::Add {
                name,
                stock,
                schedule,
                start,
            }) => {
                assert_eq!(name, "veggies");
                assert_eq!(stock, "fridge");
                assert_eq!(schedule, "weekly:mon,thu");
                assert_eq!(start, None);
                Ok(())
            }
            _ => bail!("Expected Routine Add command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        let args = Cli::try_parse_from(["larder", "stock", "expiring", "--today", "yesterday"]);
        assert!(args.is_err());
    }

    #[test]
    fn test_cli_parse_food_search() -> Result<()> {
        let args = Cli::parse_from(["larder", "search", "leek", "--foods"]);
        match args.command {
            Commands::Search { query, ranked, foods } => {
                assert_eq!(query, "leek");
                assert!(!ranked);
                assert!(foods);
                Ok(())
            }
            _ => bail!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_food_search_is_always_ranked() {
        let args = Cli::try_parse_from(["larder", "search", "leek", "--foods", "--ranked"]);
        assert!(args.is_err());
    }
}

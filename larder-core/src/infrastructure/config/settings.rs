// larder-core/src/infrastructure/config/settings.rs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::domain::recipe::MatchPolicy;
use crate::domain::search::{RANK_THRESHOLD, TITLE_DISTANCE};

pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct AppConfig {
    #[validate(length(min = 1))]
    #[serde(default = "default_name")]
    pub name: String,

    /// DuckDB file, relative to the data directory (or ":memory:").
    #[serde(default = "default_database")]
    pub database: String,

    #[serde(rename = "config-paths", default)]
    pub config_paths: Vec<String>,

    #[serde(default)]
    #[validate(nested)]
    pub matching: MatchingConfig,

    #[serde(default)]
    #[validate(nested)]
    pub search: SearchConfig,

    #[serde(default)]
    #[validate(nested)]
    pub sync: SyncConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Validate)]
pub struct MatchingConfig {
    #[serde(flatten)]
    pub policy: MatchPolicy,

    /// Ingredient lists fetched in parallel.
    #[validate(range(min = 1, max = 64))]
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Validate)]
pub struct SearchConfig {
    #[validate(range(max = 64))]
    #[serde(default = "default_title_distance")]
    pub title_distance: usize,

    #[validate(range(min = -100, max = 100))]
    #[serde(default = "default_rank_threshold")]
    pub rank_threshold: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Validate)]
pub struct SyncConfig {
    /// Extra attempts after a failed remote fetch.
    #[validate(range(max = 10))]
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Delay before the first retry; doubled on each further attempt.
    #[validate(range(max = 60_000))]
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

impl AppConfig {
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        if self.database == IN_MEMORY {
            PathBuf::from(IN_MEMORY)
        } else {
            data_dir.join(&self.database)
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            database: default_database(),
            config_paths: Vec::new(),
            matching: MatchingConfig::default(),
            search: SearchConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            policy: MatchPolicy::default(),
            fetch_concurrency: default_fetch_concurrency(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            title_distance: default_title_distance(),
            rank_threshold: default_rank_threshold(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

fn default_name() -> String {
    "larder".to_string()
}
fn default_database() -> String {
    "larder.duckdb".to_string()
}
fn default_fetch_concurrency() -> usize {
    8
}
fn default_title_distance() -> usize {
    TITLE_DISTANCE
}
fn default_rank_threshold() -> i64 {
    RANK_THRESHOLD
}
fn default_retries() -> u32 {
    3
}
fn default_backoff_ms() -> u64 {
    200
}

// larder-core/src/infrastructure/adapters/feed.rs

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::domain::decode::{DecodeStats, decode_food};
use crate::domain::food::Food;
use crate::error::LarderError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::remote::RemoteFoodSource;

/// Reference food feed exported as JSON: either a bare array of food
/// objects or `{ "foods": [...] }`.
pub struct JsonFeedSource {
    path: PathBuf,
    stats: DecodeStats,
}

impl JsonFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            stats: DecodeStats::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Decodes every entry, skipping malformed ones.
    pub fn decode_feed(&self, payload: &Value) -> Result<Vec<Food>, InfrastructureError> {
        let entries = match payload {
            Value::Array(items) => items,
            Value::Object(obj) => match obj.get("foods") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(InfrastructureError::ImportError {
                        path: self.path.display().to_string(),
                        reason: "expected a 'foods' array".into(),
                    });
                }
            },
            _ => {
                return Err(InfrastructureError::ImportError {
                    path: self.path.display().to_string(),
                    reason: "expected an array of foods".into(),
                });
            }
        };

        let mut foods = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match decode_food(entry, &self.stats) {
                Ok(food) => foods.push(food),
                Err(e) => warn!(index, error = %e, "Skipping malformed feed entry"),
            }
        }
        Ok(foods)
    }
}

#[async_trait]
impl RemoteFoodSource for JsonFeedSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_foods(&self) -> Result<Vec<Food>, LarderError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            LarderError::RemoteUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        let payload: Value =
            serde_json::from_str(&content).map_err(InfrastructureError::JsonError)?;

        let foods = self.decode_feed(&payload)?;
        info!(count = foods.len(), "Fetched reference foods");
        Ok(foods)
    }
}

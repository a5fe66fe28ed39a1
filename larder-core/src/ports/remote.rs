// larder-core/src/ports/remote.rs

use crate::domain::food::Food;
use crate::error::LarderError;
use async_trait::async_trait;

/// The remote reference catalog the local food table is refreshed from.
#[async_trait]
pub trait RemoteFoodSource: Send + Sync {
    async fn fetch_foods(&self) -> Result<Vec<Food>, LarderError>;
}

// larder-core/src/ports/catalog.rs

use crate::domain::food::Food;
use crate::domain::recipe::{Ingredient, Instruction, Recipe};
use crate::error::LarderError;
use async_trait::async_trait;

/// Read side of the recipe catalog. Implementations backed by a remote
/// service may fail per call; callers decide how to degrade.
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    async fn all_recipes(&self) -> Result<Vec<Recipe>, LarderError>;

    async fn ingredients(&self, recipe_id: i64) -> Result<Vec<Ingredient>, LarderError>;

    async fn instructions(&self, recipe_id: i64) -> Result<Vec<Instruction>, LarderError>;

    /// Case-insensitive exact title lookup.
    async fn find_by_title(&self, title: &str) -> Result<Vec<Recipe>, LarderError>;
}

#[async_trait]
pub trait FoodCatalog: Send + Sync {
    async fn foods(&self) -> Result<Vec<Food>, LarderError>;

    /// Insert or replace by local id (last write wins).
    async fn upsert_food(&self, food: &Food) -> Result<(), LarderError>;

    /// Merges a food from the shared catalog, where `remote.id` is the
    /// remote identifier. It updates the food already linked to that id,
    /// else adopts an unlinked food with the same name, else inserts a new
    /// one. Returns the food under its local id.
    async fn merge_remote_food(&self, remote: &Food) -> Result<Food, LarderError>;
}

// larder-core/src/ports/storage.rs

// What the application needs from local storage, without knowing how it's done.
// Lookups that find nothing return empty lists; errors are reserved for
// genuine I/O or constraint failures.

use crate::domain::food::{FoodCard, NewFoodCard, Stock};
use crate::domain::routine::Routine;
use crate::domain::units::Quantity;
use crate::error::LarderError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait FoodCardStore: Send + Sync {
    async fn all_cards(&self) -> Result<Vec<FoodCard>, LarderError>;

    async fn cards_by_stock(&self, stock_id: i64) -> Result<Vec<FoodCard>, LarderError>;

    async fn cards_by_routine(&self, routine_id: i64) -> Result<Vec<FoodCard>, LarderError>;

    /// Cards whose name scores at least `threshold` against `query`, best
    /// match first.
    async fn cards_by_name(&self, query: &str, threshold: i64) -> Result<Vec<FoodCard>, LarderError>;

    async fn insert_card(&self, card: NewFoodCard) -> Result<FoodCard, LarderError>;

    /// Returns false when no card has this id.
    async fn update_quantity(&self, card_id: i64, quantity: &Quantity) -> Result<bool, LarderError>;

    /// Returns false when no card has this id.
    async fn delete_card(&self, card_id: i64) -> Result<bool, LarderError>;
}

#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn create_stock(&self, name: &str) -> Result<Stock, LarderError>;

    async fn stock_by_name(&self, name: &str) -> Result<Option<Stock>, LarderError>;

    async fn stocks(&self) -> Result<Vec<Stock>, LarderError>;

    /// Deletes the stock and every card it holds.
    async fn delete_stock(&self, stock_id: i64) -> Result<bool, LarderError>;

    /// `routine.id` is ignored; the stored routine is returned.
    async fn create_routine(&self, routine: Routine) -> Result<Routine, LarderError>;

    async fn routines(&self) -> Result<Vec<Routine>, LarderError>;

    /// Inserts the restocked `copies` and records `date` as the routine's
    /// last run. Either everything is stored or nothing is.
    async fn record_routine_run(
        &self,
        routine_id: i64,
        date: NaiveDate,
        copies: Vec<NewFoodCard>,
    ) -> Result<Vec<FoodCard>, LarderError>;

    /// Deletes the routine and its template cards.
    async fn delete_routine(&self, routine_id: i64) -> Result<bool, LarderError>;
}

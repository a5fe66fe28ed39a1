// larder-core/src/domain/food/mod.rs

pub mod card;
pub mod category;

pub use card::{CardOwner, FoodCard, NewFoodCard};
pub use category::FoodCategory;

use crate::domain::units::Unit;
use serde::{Deserialize, Serialize};

/// A reference food concept from the shared catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: FoodCategory,
    #[serde(default = "default_unit")]
    pub default_unit: Unit,
}

fn default_unit() -> Unit {
    Unit::Piece
}

/// A named place holding food cards (fridge, pantry...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: i64,
    pub name: String,
}

// larder-core/src/domain/food/card.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::units::Quantity;

/// Who holds a food card. A card sits in a stock or is a template inside a
/// routine, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum CardOwner {
    Stock(i64),
    Routine(i64),
}

/// A perishable item the user holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodCard {
    pub id: i64,
    pub food_id: i64,
    pub name: String,
    pub quantity: Quantity,
    #[serde(default)]
    pub expiry: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub owner: CardOwner,
}

fn default_active() -> bool {
    true
}

impl FoodCard {
    /// True when the card expires on or before `limit`. Cards without an
    /// expiry date never expire.
    pub fn expires_by(&self, limit: NaiveDate) -> bool {
        self.expiry.is_some_and(|date| date <= limit)
    }
}

/// Input for creating a food card.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewFoodCard {
    pub food_id: i64,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub quantity: Quantity,
    pub expiry: Option<NaiveDate>,
    pub owner: CardOwner,
}

impl NewFoodCard {
    pub fn into_card(self, id: i64) -> FoodCard {
        FoodCard {
            id,
            food_id: self.food_id,
            name: self.name,
            quantity: self.quantity,
            expiry: self.expiry,
            active: true,
            owner: self.owner,
        }
    }
}

impl From<&FoodCard> for NewFoodCard {
    fn from(card: &FoodCard) -> Self {
        Self {
            food_id: card.food_id,
            name: card.name.clone(),
            quantity: card.quantity.clone(),
            expiry: card.expiry,
            owner: card.owner,
        }
    }
}

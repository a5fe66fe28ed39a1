// larder-core/src/domain/recipe/mod.rs

pub mod matching;

pub use matching::{MatchPolicy, RecipeMatch, evaluate_recipe, is_satisfied, rank_matches};

use crate::domain::units::Quantity;
use serde::{Deserialize, Serialize};

/// Descriptive recipe metadata. Ingredients and instructions are fetched
/// separately through the catalog port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub preparation_minutes: u32,
    #[serde(default)]
    pub cooking_minutes: u32,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    pub price_per_serving: f64,
}

impl Recipe {
    pub fn total_minutes(&self) -> u32 {
        self.preparation_minutes + self.cooking_minutes
    }
}

/// One required ingredient of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub recipe_id: i64,
    pub food_id: i64,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: Quantity,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub recipe_id: i64,
    pub step: u32,
    pub text: String,
}

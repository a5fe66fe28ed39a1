// larder-core/src/domain/recipe/matching.rs
//
// Recipe matching engine: which ingredients of a recipe the held food cards
// cover, and whether the recipe stays within the missing-ingredient tolerance.

use serde::{Deserialize, Serialize};

use crate::domain::food::FoodCard;
use crate::domain::recipe::{Ingredient, Recipe};
use crate::domain::units::quantity_satisfies;

pub const DEFAULT_MAX_MISSING: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPolicy {
    #[serde(default = "default_max_missing")]
    pub max_missing: usize,

    /// When true (the historical behaviour), an absent optional ingredient
    /// counts as missing like any other.
    #[serde(default = "default_optional_counts")]
    pub optional_counts_as_missing: bool,
}

fn default_max_missing() -> usize {
    DEFAULT_MAX_MISSING
}
fn default_optional_counts() -> bool {
    true
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            max_missing: DEFAULT_MAX_MISSING,
            optional_counts_as_missing: true,
        }
    }
}

impl MatchPolicy {
    pub fn with_max_missing(mut self, max_missing: usize) -> Self {
        self.max_missing = max_missing;
        self
    }
}

/// Derived result for one (recipe, held cards) pair. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeMatch {
    pub recipe: Recipe,
    pub satisfied: usize,
    pub missing: Vec<Ingredient>,
    pub passes: bool,
}

impl RecipeMatch {
    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }
}

/// True when `held` is an active card of the same food and covers the
/// required quantity.
pub fn is_satisfied(required: &Ingredient, held: &FoodCard) -> bool {
    held.active
        && held.food_id == required.food_id
        && quantity_satisfies(&required.quantity, &held.quantity)
}

/// Evaluates one recipe. An ingredient is satisfied when any single card
/// covers it; partial cards are not summed.
pub fn evaluate_recipe(
    recipe: Recipe,
    ingredients: &[Ingredient],
    holdings: &[FoodCard],
    policy: &MatchPolicy,
) -> RecipeMatch {
    let (covered, uncovered): (Vec<&Ingredient>, Vec<&Ingredient>) = ingredients
        .iter()
        .partition(|ingredient| holdings.iter().any(|card| is_satisfied(ingredient, card)));

    let missing: Vec<Ingredient> = uncovered.into_iter().cloned().collect();
    let blocking = missing
        .iter()
        .filter(|i| policy.optional_counts_as_missing || !i.optional)
        .count();

    RecipeMatch {
        recipe,
        satisfied: covered.len(),
        passes: blocking <= policy.max_missing,
        missing,
    }
}

/// Keeps passing matches, best coverage first. Stable: equal scores keep
/// their input order.
pub fn rank_matches(matches: Vec<RecipeMatch>) -> Vec<RecipeMatch> {
    let mut kept: Vec<RecipeMatch> = matches.into_iter().filter(|m| m.passes).collect();
    kept.sort_by(|a, b| b.satisfied.cmp(&a.satisfied));
    kept
}

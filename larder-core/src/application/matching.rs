// larder-core/src/application/matching.rs

use futures::StreamExt;
use tracing::{debug, info, instrument, warn};

use crate::domain::food::{CardOwner, FoodCard};
use crate::domain::recipe::{MatchPolicy, Recipe, RecipeMatch, evaluate_recipe, rank_matches};
use crate::error::LarderError;
use crate::ports::catalog::RecipeCatalog;
use crate::ports::storage::FoodCardStore;

/// Matches `recipes` against `holdings` and returns the passing ones, most
/// satisfied ingredients first.
///
/// Ingredient lists are fetched with up to `concurrency` requests in flight.
/// A recipe whose list cannot be fetched is logged and left out; the rest of
/// the batch carries on.
#[instrument(skip_all, fields(recipes = recipes.len(), holdings = holdings.len()))]
pub async fn filter_recipes(
    catalog: &dyn RecipeCatalog,
    recipes: Vec<Recipe>,
    holdings: &[FoodCard],
    policy: &MatchPolicy,
    concurrency: usize,
) -> Vec<RecipeMatch> {
    // `buffered` keeps input order, which the stable ranking relies on.
    let fetched: Vec<_> = futures::stream::iter(recipes.into_iter().map(|recipe| async move {
        let ingredients = catalog.ingredients(recipe.id).await;
        (recipe, ingredients)
    }))
    .buffered(concurrency.max(1))
    .collect()
    .await;

    let mut evaluated = Vec::with_capacity(fetched.len());
    for (recipe, ingredients) in fetched {
        match ingredients {
            Ok(ingredients) => {
                let result = evaluate_recipe(recipe, &ingredients, holdings, policy);
                debug!(
                    recipe_id = result.recipe.id,
                    satisfied = result.satisfied,
                    missing = result.missing_count(),
                    passes = result.passes,
                    "Recipe evaluated"
                );
                evaluated.push(result);
            }
            Err(e) => {
                warn!(
                    recipe_id = recipe.id,
                    title = %recipe.title,
                    error = %e,
                    "Skipping recipe: ingredient list unavailable"
                );
            }
        }
    }

    let ranked = rank_matches(evaluated);
    info!(matched = ranked.len(), "Recipe filtering done");
    ranked
}

/// Matches the whole catalog against the cards held in stocks (all stocks,
/// or only `stock_id`). Routine template cards are never holdings.
pub async fn match_stock(
    cards: &dyn FoodCardStore,
    catalog: &dyn RecipeCatalog,
    stock_id: Option<i64>,
    policy: &MatchPolicy,
    concurrency: usize,
) -> Result<Vec<RecipeMatch>, LarderError> {
    let holdings: Vec<FoodCard> = match stock_id {
        Some(id) => cards.cards_by_stock(id).await?,
        None => cards
            .all_cards()
            .await?
            .into_iter()
            .filter(|c| matches!(c.owner, CardOwner::Stock(_)))
            .collect(),
    };
    let recipes = catalog.all_recipes().await?;

    Ok(filter_recipes(catalog, recipes, &holdings, policy, concurrency).await)
}

// larder-core/src/application/search.rs

use tracing::instrument;

use crate::domain::food::Food;
use crate::domain::recipe::Recipe;
use crate::domain::search::{find_by_fuzzy_title, rank};
use crate::error::LarderError;
use crate::ports::catalog::{FoodCatalog, RecipeCatalog};

/// Fuzzy title search over the whole catalog. Catalog order is kept unless
/// `ranked` is set, in which case hits are ordered by relevance.
#[instrument(skip(catalog))]
pub async fn search_recipes(
    catalog: &dyn RecipeCatalog,
    query: &str,
    max_distance: usize,
    ranked: bool,
) -> Result<Vec<Recipe>, LarderError> {
    let recipes = catalog.all_recipes().await?;
    let hits: Vec<Recipe> = find_by_fuzzy_title(query, &recipes, max_distance)
        .into_iter()
        .cloned()
        .collect();

    if !ranked {
        return Ok(hits);
    }
    Ok(rank(query, &hits, |r| r.title.as_str(), i64::MIN)
        .into_iter()
        .cloned()
        .collect())
}

/// Food picker: catalog foods most relevant to `query`.
#[instrument(skip(foods))]
pub async fn search_foods(
    foods: &dyn FoodCatalog,
    query: &str,
    threshold: i64,
) -> Result<Vec<Food>, LarderError> {
    let all = foods.foods().await?;
    Ok(rank(query, &all, |f| f.name.as_str(), threshold)
        .into_iter()
        .cloned()
        .collect())
}

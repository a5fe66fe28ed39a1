// larder/src/commands/search.rs
//
// USE CASE: Fuzzy recipe title search and the food picker.

use comfy_table::Table;
use std::path::Path;

use larder_core::application::{search_foods, search_recipes};

use super::Larder;

pub async fn execute(data_dir: &Path, query: &str, ranked: bool) -> anyhow::Result<()> {
    let larder = Larder::open(data_dir)?;
    let hits = search_recipes(
        &larder.store,
        query,
        larder.config.search.title_distance,
        ranked,
    )
    .await?;

    if hits.is_empty() {
        println!("No recipe matches '{}'", query);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["id", "title", "minutes", "servings"]);
    for recipe in &hits {
        table.add_row(vec![
            recipe.id.to_string(),
            recipe.title.clone(),
            recipe.total_minutes().to_string(),
            recipe.servings.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn execute_foods(data_dir: &Path, query: &str) -> anyhow::Result<()> {
    let larder = Larder::open(data_dir)?;
    let foods = search_foods(&larder.store, query, larder.config.search.rank_threshold).await?;

    if foods.is_empty() {
        println!("No food matches '{}'", query);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["id", "name", "category", "unit"]);
    for food in &foods {
        table.add_row(vec![
            food.id.to_string(),
            food.name.clone(),
            food.category.to_string(),
            food.default_unit.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

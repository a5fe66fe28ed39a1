// larder-core/src/infrastructure/import.rs
//
// YAML catalog documents: reference foods and authored recipes.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::domain::food::{Food, FoodCategory};
use crate::domain::recipe::{Ingredient, Recipe};
use crate::domain::units::{Quantity, Unit};
use crate::error::LarderError;
use crate::infrastructure::adapters::duckdb::{DuckDBStore, NewRecipe};
use crate::infrastructure::error::InfrastructureError;
use crate::ports::catalog::{FoodCatalog, RecipeCatalog};

#[derive(Debug, Deserialize, Default)]
pub struct CatalogDocument {
    #[serde(default)]
    pub foods: Vec<FoodEntry>,
    #[serde(default)]
    pub recipes: Vec<RecipeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct FoodEntry {
    pub name: String,
    #[serde(default)]
    pub category: FoodCategory,
    #[serde(default)]
    pub default_unit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecipeEntry {
    pub title: String,
    #[serde(default)]
    pub preparation_minutes: u32,
    #[serde(default)]
    pub cooking_minutes: u32,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    pub price_per_serving: f64,
    #[serde(default)]
    pub ingredients: Vec<IngredientEntry>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

fn default_servings() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct IngredientEntry {
    pub food: String,
    /// Free text such as "250 g", "2" or "to taste".
    pub quantity: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub files: usize,
    pub foods: usize,
    pub recipes: usize,
    pub skipped_recipes: usize,
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}

/// `path` itself when it is a file, otherwise every YAML file below it in a
/// stable order.
pub fn discover_documents(path: &Path) -> Result<Vec<PathBuf>, InfrastructureError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.exists() {
        return Err(InfrastructureError::ImportError {
            path: path.display().to_string(),
            reason: "no such file or directory".into(),
        });
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_yaml(p))
        .collect();
    files.sort();
    Ok(files)
}

pub fn load_document(path: &Path) -> Result<CatalogDocument, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| InfrastructureError::ImportError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn build_recipe(
    store: &DuckDBStore,
    path: &Path,
    entry: RecipeEntry,
) -> Result<NewRecipe, LarderError> {
    let mut ingredients = Vec::with_capacity(entry.ingredients.len());
    for ing in entry.ingredients {
        let quantity: Quantity =
            ing.quantity
                .parse()
                .map_err(|e| InfrastructureError::ImportError {
                    path: path.display().to_string(),
                    reason: format!("recipe '{}', ingredient '{}': {}", entry.title, ing.food, e),
                })?;
        let food_id = store.ensure_food(&ing.food, quantity.unit())?;

        ingredients.push(Ingredient {
            id: 0,
            recipe_id: 0,
            food_id,
            description: ing.description,
            quantity,
            price: ing.price,
            optional: ing.optional,
        });
    }

    Ok(NewRecipe {
        recipe: Recipe {
            id: 0,
            title: entry.title,
            preparation_minutes: entry.preparation_minutes,
            cooking_minutes: entry.cooking_minutes,
            servings: entry.servings,
            vegetarian: entry.vegetarian,
            vegan: entry.vegan,
            gluten_free: entry.gluten_free,
            price_per_serving: entry.price_per_serving,
        },
        ingredients,
        instructions: entry.instructions,
    })
}

/// Imports every document under `path`. Recipes whose title already
/// exists are skipped, so re-importing a directory is harmless.
#[instrument(skip(store, path), fields(path = %path.display()))]
pub async fn import_catalog(store: &DuckDBStore, path: &Path) -> Result<ImportReport, LarderError> {
    let mut report = ImportReport::default();

    for file in discover_documents(path)? {
        let document = load_document(&file)?;
        report.files += 1;
        debug!(file = %file.display(), "Importing catalog document");

        for entry in document.foods {
            let unit = entry
                .default_unit
                .as_deref()
                .map(Unit::parse_lenient)
                .unwrap_or(Unit::Piece);
            let id = store.ensure_food(&entry.name, &unit)?;
            store
                .upsert_food(&Food {
                    id,
                    name: entry.name,
                    category: entry.category,
                    default_unit: unit,
                })
                .await?;
            report.foods += 1;
        }

        for entry in document.recipes {
            if !store.find_by_title(&entry.title).await?.is_empty() {
                debug!(title = %entry.title, "Recipe already in catalog, skipping");
                report.skipped_recipes += 1;
                continue;
            }
            let recipe = build_recipe(store, &file, entry)?;
            store.insert_recipe(&recipe)?;
            report.recipes += 1;
        }
    }

    info!(
        files = report.files,
        foods = report.foods,
        recipes = report.recipes,
        "Catalog import finished"
    );
    Ok(report)
}

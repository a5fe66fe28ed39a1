// larder-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use duckdb::{Config, Connection, ToSql, params};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

// Hexagonal imports
use crate::domain::food::{CardOwner, Food, FoodCard, FoodCategory, NewFoodCard, Stock};
use crate::domain::recipe::{Ingredient, Instruction, Recipe};
use crate::domain::routine::{Routine, RoutineSchedule};
use crate::domain::search::rank;
use crate::domain::units::{Quantity, Unit};
use crate::error::LarderError;
use crate::infrastructure::config::settings::IN_MEMORY;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::catalog::{FoodCatalog, RecipeCatalog};
use crate::ports::storage::{FoodCardStore, InventoryStore};

// DuckDB has no ON DELETE CASCADE: owned cards are removed explicitly.
const SCHEMA: &str = r#"
CREATE SEQUENCE IF NOT EXISTS seq_stocks START 1;
CREATE SEQUENCE IF NOT EXISTS seq_routines START 1;
CREATE SEQUENCE IF NOT EXISTS seq_food_cards START 1;
CREATE SEQUENCE IF NOT EXISTS seq_recipes START 1;
CREATE SEQUENCE IF NOT EXISTS seq_ingredients START 1;

CREATE TABLE IF NOT EXISTS foods (
    id BIGINT PRIMARY KEY,
    name VARCHAR NOT NULL,
    category VARCHAR NOT NULL,
    default_unit VARCHAR NOT NULL,
    remote_id BIGINT
);

CREATE TABLE IF NOT EXISTS stocks (
    id BIGINT PRIMARY KEY DEFAULT nextval('seq_stocks'),
    name VARCHAR NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS routines (
    id BIGINT PRIMARY KEY DEFAULT nextval('seq_routines'),
    name VARCHAR NOT NULL,
    stock_id BIGINT NOT NULL,
    schedule VARCHAR NOT NULL,
    start_date DATE NOT NULL,
    last_run DATE,
    active BOOLEAN NOT NULL DEFAULT TRUE
);

CREATE TABLE IF NOT EXISTS food_cards (
    id BIGINT PRIMARY KEY DEFAULT nextval('seq_food_cards'),
    food_id BIGINT NOT NULL,
    name VARCHAR NOT NULL,
    quantity DOUBLE,
    unit VARCHAR NOT NULL,
    expiry DATE,
    active BOOLEAN NOT NULL DEFAULT TRUE,
    stock_id BIGINT,
    routine_id BIGINT,
    CHECK ((stock_id IS NULL) <> (routine_id IS NULL))
);

CREATE TABLE IF NOT EXISTS recipes (
    id BIGINT PRIMARY KEY DEFAULT nextval('seq_recipes'),
    title VARCHAR NOT NULL,
    preparation_minutes BIGINT NOT NULL DEFAULT 0,
    cooking_minutes BIGINT NOT NULL DEFAULT 0,
    servings BIGINT NOT NULL DEFAULT 1,
    vegetarian BOOLEAN NOT NULL DEFAULT FALSE,
    vegan BOOLEAN NOT NULL DEFAULT FALSE,
    gluten_free BOOLEAN NOT NULL DEFAULT FALSE,
    price_per_serving DOUBLE NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS ingredients (
    id BIGINT PRIMARY KEY DEFAULT nextval('seq_ingredients'),
    recipe_id BIGINT NOT NULL,
    food_id BIGINT NOT NULL,
    description VARCHAR,
    quantity DOUBLE,
    unit VARCHAR NOT NULL,
    price DOUBLE NOT NULL DEFAULT 0,
    optional BOOLEAN NOT NULL DEFAULT FALSE
);

CREATE TABLE IF NOT EXISTS instructions (
    recipe_id BIGINT NOT NULL,
    step BIGINT NOT NULL,
    text VARCHAR NOT NULL,
    PRIMARY KEY (recipe_id, step)
);
"#;

const CARD_COLUMNS: &str = "id, food_id, name, quantity, unit, CAST(expiry AS VARCHAR), active, stock_id, routine_id";
const RECIPE_COLUMNS: &str = "id, title, preparation_minutes, cooking_minutes, servings, vegetarian, vegan, gluten_free, price_per_serving";
const ROUTINE_COLUMNS: &str = "id, name, stock_id, schedule, CAST(start_date AS VARCHAR), CAST(last_run AS VARCHAR), active";

/// A recipe with its ingredients and instructions, ready to be stored.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub recipe: Recipe,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
}

/// The single long-lived store handle. Construct it once and inject it.
pub struct DuckDBStore {
    conn: Arc<Mutex<Connection>>,
}

// --- ROW MAPPING ---

fn corrupt(table: &'static str, reason: impl Into<String>) -> LarderError {
    LarderError::Infrastructure(InfrastructureError::Database(DatabaseError::CorruptRow {
        table,
        reason: reason.into(),
    }))
}

fn parse_date(table: &'static str, raw: Option<String>) -> Result<Option<NaiveDate>, LarderError> {
    raw.map(|s| {
        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|e| corrupt(table, format!("invalid date '{}': {}", s, e)))
    })
    .transpose()
}

fn date_param(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

fn to_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

type CardRow = (
    i64,
    i64,
    String,
    Option<f64>,
    String,
    Option<String>,
    bool,
    Option<i64>,
    Option<i64>,
);

fn card_from_row(row: CardRow) -> Result<FoodCard, LarderError> {
    let (id, food_id, name, quantity, unit, expiry, active, stock_id, routine_id) = row;
    let owner = match (stock_id, routine_id) {
        (Some(stock), None) => CardOwner::Stock(stock),
        (None, Some(routine)) => CardOwner::Routine(routine),
        _ => return Err(corrupt("food_cards", format!("card {} has no single owner", id))),
    };

    Ok(FoodCard {
        id,
        food_id,
        name,
        quantity: Quantity::from_optional(quantity, Unit::parse_lenient(&unit)),
        expiry: parse_date("food_cards", expiry)?,
        active,
        owner,
    })
}

fn insert_card_row(conn: &Connection, card: NewFoodCard) -> Result<FoodCard, LarderError> {
    let (stock_id, routine_id) = match card.owner {
        CardOwner::Stock(id) => (Some(id), None),
        CardOwner::Routine(id) => (None, Some(id)),
    };

    let id: i64 = conn.query_row(
        "INSERT INTO food_cards (food_id, name, quantity, unit, expiry, active, stock_id, routine_id)
         VALUES (?, ?, ?, ?, CAST(? AS DATE), TRUE, ?, ?) RETURNING id",
        params![
            card.food_id,
            card.name,
            card.quantity.value(),
            card.quantity.unit().as_str(),
            date_param(card.expiry),
            stock_id,
            routine_id
        ],
        |row| row.get(0),
    )?;

    Ok(card.into_card(id))
}

fn recipe_from_row(row: &duckdb::Row<'_>) -> duckdb::Result<Recipe> {
    Ok(Recipe {
        id: row.get(0)?,
        title: row.get(1)?,
        preparation_minutes: to_u32(row.get(2)?),
        cooking_minutes: to_u32(row.get(3)?),
        servings: to_u32(row.get(4)?),
        vegetarian: row.get(5)?,
        vegan: row.get(6)?,
        gluten_free: row.get(7)?,
        price_per_serving: row.get(8)?,
    })
}

impl DuckDBStore {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == IN_MEMORY {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };
        conn.execute_batch(SCHEMA)?;
        debug!(path = db_path, "DuckDB schema ready");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open(path: &Path) -> Result<Self, InfrastructureError> {
        Self::new(&path.to_string_lossy())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, LarderError> {
        self.conn
            .lock()
            .map_err(|_| LarderError::Infrastructure(DatabaseError::Poisoned.into()))
    }

    fn query_cards(&self, filter: &str, args: &[&dyn ToSql]) -> Result<Vec<FoodCard>, LarderError> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM food_cards {} ORDER BY id", CARD_COLUMNS, filter);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(args, |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                    row.get(8)?,
                ))
            })?
            .collect::<Result<Vec<CardRow>, _>>()?;

        rows.into_iter().map(card_from_row).collect()
    }

    /// Id of the food named `name` (case-insensitive), created with an
    /// `Unknown` category when missing.
    pub fn ensure_food(&self, name: &str, default_unit: &Unit) -> Result<i64, LarderError> {
        let conn = self.lock()?;
        let existing: Vec<i64> = {
            let mut stmt =
                conn.prepare("SELECT id FROM foods WHERE lower(name) = lower(?) ORDER BY id")?;
            stmt.query_map(params![name], |row| row.get(0))?
                .collect::<Result<Vec<_>, _>>()?
        };
        if let Some(id) = existing.first() {
            return Ok(*id);
        }

        let id: i64 = conn.query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM foods", [], |row| {
            row.get(0)
        })?;
        conn.execute(
            "INSERT INTO foods (id, name, category, default_unit) VALUES (?, ?, ?, ?)",
            params![id, name, FoodCategory::Unknown.as_str(), default_unit.as_str()],
        )?;
        debug!(food = name, id, "Created catalog food");
        Ok(id)
    }

    pub fn insert_recipe(&self, new: &NewRecipe) -> Result<Recipe, LarderError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let r = &new.recipe;
        let id: i64 = tx.query_row(
            "INSERT INTO recipes (title, preparation_minutes, cooking_minutes, servings, vegetarian, vegan, gluten_free, price_per_serving)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
            params![
                r.title,
                i64::from(r.preparation_minutes),
                i64::from(r.cooking_minutes),
                i64::from(r.servings),
                r.vegetarian,
                r.vegan,
                r.gluten_free,
                r.price_per_serving
            ],
            |row| row.get(0),
        )?;

        for ing in &new.ingredients {
            tx.execute(
                "INSERT INTO ingredients (recipe_id, food_id, description, quantity, unit, price, optional)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                params![
                    id,
                    ing.food_id,
                    ing.description,
                    ing.quantity.value(),
                    ing.quantity.unit().as_str(),
                    ing.price,
                    ing.optional
                ],
            )?;
        }

        for (step, text) in new.instructions.iter().enumerate() {
            tx.execute(
                "INSERT INTO instructions (recipe_id, step, text) VALUES (?, ?, ?)",
                params![id, (step + 1) as i64, text],
            )?;
        }

        tx.commit()?;

        Ok(Recipe {
            id,
            ..new.recipe.clone()
        })
    }

    fn query_recipes(&self, filter: &str, args: &[&dyn ToSql]) -> Result<Vec<Recipe>, LarderError> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM recipes {} ORDER BY id", RECIPE_COLUMNS, filter);
        let mut stmt = conn.prepare(&sql)?;
        let recipes = stmt
            .query_map(args, recipe_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(recipes)
    }
}

#[async_trait]
impl FoodCardStore for DuckDBStore {
    async fn all_cards(&self) -> Result<Vec<FoodCard>, LarderError> {
        self.query_cards("", params![])
    }

    async fn cards_by_stock(&self, stock_id: i64) -> Result<Vec<FoodCard>, LarderError> {
        self.query_cards("WHERE stock_id = ?", params![stock_id])
    }

    async fn cards_by_routine(&self, routine_id: i64) -> Result<Vec<FoodCard>, LarderError> {
        self.query_cards("WHERE routine_id = ?", params![routine_id])
    }

    async fn cards_by_name(&self, query: &str, threshold: i64) -> Result<Vec<FoodCard>, LarderError> {
        let cards = self.query_cards("", params![])?;
        Ok(rank(query, &cards, |c| c.name.as_str(), threshold)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn insert_card(&self, card: NewFoodCard) -> Result<FoodCard, LarderError> {
        let conn = self.lock()?;
        insert_card_row(&conn, card)
    }

    async fn update_quantity(&self, card_id: i64, quantity: &Quantity) -> Result<bool, LarderError> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE food_cards SET quantity = ?, unit = ? WHERE id = ?",
            params![quantity.value(), quantity.unit().as_str(), card_id],
        )?;
        Ok(changed > 0)
    }

    async fn delete_card(&self, card_id: i64) -> Result<bool, LarderError> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM food_cards WHERE id = ?", params![card_id])?;
        Ok(changed > 0)
    }
}

#[async_trait]
impl InventoryStore for DuckDBStore {
    async fn create_stock(&self, name: &str) -> Result<Stock, LarderError> {
        let conn = self.lock()?;
        let id: i64 = conn.query_row(
            "INSERT INTO stocks (name) VALUES (?) RETURNING id",
            params![name],
            |row| row.get(0),
        )?;
        Ok(Stock {
            id,
            name: name.to_string(),
        })
    }

    async fn stock_by_name(&self, name: &str) -> Result<Option<Stock>, LarderError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name FROM stocks WHERE lower(name) = lower(?)")?;
        let mut found = stmt
            .query_map(params![name], |row| {
                Ok(Stock {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(found.pop())
    }

    async fn stocks(&self) -> Result<Vec<Stock>, LarderError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name FROM stocks ORDER BY id")?;
        let stocks = stmt
            .query_map([], |row| {
                Ok(Stock {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(stocks)
    }

    async fn delete_stock(&self, stock_id: i64) -> Result<bool, LarderError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM food_cards WHERE stock_id = ?", params![stock_id])?;
        let changed = tx.execute("DELETE FROM stocks WHERE id = ?", params![stock_id])?;
        tx.commit()?;
        Ok(changed > 0)
    }

    async fn create_routine(&self, routine: Routine) -> Result<Routine, LarderError> {
        let conn = self.lock()?;
        let id: i64 = conn.query_row(
            "INSERT INTO routines (name, stock_id, schedule, start_date, last_run, active)
             VALUES (?, ?, ?, CAST(? AS DATE), CAST(? AS DATE), ?) RETURNING id",
            params![
                routine.name,
                routine.stock_id,
                routine.schedule.to_string(),
                date_param(Some(routine.start)),
                date_param(routine.last_run),
                routine.active
            ],
            |row| row.get(0),
        )?;
        Ok(Routine { id, ..routine })
    }

    async fn routines(&self) -> Result<Vec<Routine>, LarderError> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM routines ORDER BY id", ROUTINE_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, Option<String>>(5)?,
                    row.get::<_, bool>(6)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name, stock_id, schedule, start, last_run, active)| {
                let schedule: RoutineSchedule = schedule
                    .parse()
                    .map_err(|e| corrupt("routines", format!("routine {}: {}", id, e)))?;
                let start = parse_date("routines", start)?
                    .ok_or_else(|| corrupt("routines", format!("routine {} has no start", id)))?;
                Ok(Routine {
                    id,
                    name,
                    stock_id,
                    schedule,
                    start,
                    last_run: parse_date("routines", last_run)?,
                    active,
                })
            })
            .collect()
    }

    async fn record_routine_run(
        &self,
        routine_id: i64,
        date: NaiveDate,
        copies: Vec<NewFoodCard>,
    ) -> Result<Vec<FoodCard>, LarderError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let inserted = copies
            .into_iter()
            .map(|card| insert_card_row(&tx, card))
            .collect::<Result<Vec<_>, _>>()?;

        tx.execute(
            "UPDATE routines SET last_run = CAST(? AS DATE) WHERE id = ?",
            params![date_param(Some(date)), routine_id],
        )?;
        tx.commit()?;
        Ok(inserted)
    }

    async fn delete_routine(&self, routine_id: i64) -> Result<bool, LarderError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM food_cards WHERE routine_id = ?", params![routine_id])?;
        let changed = tx.execute("DELETE FROM routines WHERE id = ?", params![routine_id])?;
        tx.commit()?;
        Ok(changed > 0)
    }
}

#[async_trait]
impl RecipeCatalog for DuckDBStore {
    async fn all_recipes(&self) -> Result<Vec<Recipe>, LarderError> {
        self.query_recipes("", params![])
    }

    async fn ingredients(&self, recipe_id: i64) -> Result<Vec<Ingredient>, LarderError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, recipe_id, food_id, description, quantity, unit, price, optional
             FROM ingredients WHERE recipe_id = ? ORDER BY id",
        )?;
        let ingredients = stmt
            .query_map(params![recipe_id], |row| {
                let unit: String = row.get(5)?;
                Ok(Ingredient {
                    id: row.get(0)?,
                    recipe_id: row.get(1)?,
                    food_id: row.get(2)?,
                    description: row.get(3)?,
                    quantity: Quantity::from_optional(row.get(4)?, Unit::parse_lenient(&unit)),
                    price: row.get(6)?,
                    optional: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ingredients)
    }

    async fn instructions(&self, recipe_id: i64) -> Result<Vec<Instruction>, LarderError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT recipe_id, step, text FROM instructions WHERE recipe_id = ? ORDER BY step",
        )?;
        let steps = stmt
            .query_map(params![recipe_id], |row| {
                Ok(Instruction {
                    recipe_id: row.get(0)?,
                    step: to_u32(row.get(1)?),
                    text: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(steps)
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Recipe>, LarderError> {
        self.query_recipes("WHERE lower(title) = lower(?)", params![title.trim()])
    }
}

#[async_trait]
impl FoodCatalog for DuckDBStore {
    async fn foods(&self) -> Result<Vec<Food>, LarderError> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT id, name, category, default_unit FROM foods ORDER BY id")?;
        let foods = stmt
            .query_map([], |row| {
                let category: String = row.get(2)?;
                let unit: String = row.get(3)?;
                Ok(Food {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    category: FoodCategory::parse_lenient(&category),
                    default_unit: Unit::parse_lenient(&unit),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(foods)
    }

    async fn upsert_food(&self, food: &Food) -> Result<(), LarderError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO foods (id, name, category, default_unit) VALUES (?, ?, ?, ?)
             ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                category = excluded.category,
                default_unit = excluded.default_unit",
            params![
                food.id,
                food.name,
                food.category.as_str(),
                food.default_unit.as_str()
            ],
        )?;
        Ok(())
    }

    async fn merge_remote_food(&self, remote: &Food) -> Result<Food, LarderError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        // Already linked, else an unlinked local food with the same name.
        let existing: Vec<i64> = {
            let mut stmt = tx.prepare(
                "SELECT id FROM foods
                 WHERE remote_id = ? OR (remote_id IS NULL AND lower(name) = lower(?))
                 ORDER BY remote_id IS NULL, id",
            )?;
            stmt.query_map(params![remote.id, remote.name], |row| row.get(0))?
                .collect::<Result<Vec<_>, _>>()?
        };

        let id = match existing.first() {
            Some(&id) => {
                tx.execute(
                    "UPDATE foods SET name = ?, category = ?, default_unit = ?, remote_id = ? WHERE id = ?",
                    params![
                        remote.name,
                        remote.category.as_str(),
                        remote.default_unit.as_str(),
                        remote.id,
                        id
                    ],
                )?;
                id
            }
            None => {
                let id: i64 =
                    tx.query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM foods", [], |row| row.get(0))?;
                tx.execute(
                    "INSERT INTO foods (id, name, category, default_unit, remote_id) VALUES (?, ?, ?, ?, ?)",
                    params![
                        id,
                        remote.name,
                        remote.category.as_str(),
                        remote.default_unit.as_str(),
                        remote.id
                    ],
                )?;
                id
            }
        };
        tx.commit()?;

        debug!(remote_id = remote.id, id, food = %remote.name, "Merged remote food");
        Ok(Food {
            id,
            ..remote.clone()
        })
    }
}

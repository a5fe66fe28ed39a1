// larder-core/src/application/mocks.rs
//
// In-memory ports for use-case tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::food::{CardOwner, Food, FoodCard, NewFoodCard, Stock};
use crate::domain::recipe::{Ingredient, Instruction, Recipe};
use crate::domain::routine::Routine;
use crate::domain::search::rank;
use crate::domain::units::Quantity;
use crate::error::LarderError;
use crate::ports::catalog::{FoodCatalog, RecipeCatalog};
use crate::ports::remote::RemoteFoodSource;
use crate::ports::storage::{FoodCardStore, InventoryStore};

#[derive(Default)]
struct State {
    next_id: i64,
    cards: Vec<FoodCard>,
    stocks: Vec<Stock>,
    routines: Vec<Routine>,
    recipes: Vec<Recipe>,
    ingredients: Vec<Ingredient>,
    foods: Vec<Food>,
    // remote id -> local food id
    remote_links: HashMap<i64, i64>,
    failing_recipes: HashSet<i64>,
}

impl State {
    fn id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

#[allow(clippy::unwrap_used)]
impl MemoryStore {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn add_recipe(&self, title: &str, ingredients: Vec<Ingredient>) -> Recipe {
        let mut state = self.state();
        let id = state.id();
        let recipe = Recipe {
            id,
            title: title.to_string(),
            preparation_minutes: 5,
            cooking_minutes: 10,
            servings: 2,
            vegetarian: false,
            vegan: false,
            gluten_free: false,
            price_per_serving: 1.0,
        };
        state.recipes.push(recipe.clone());
        for mut ing in ingredients {
            ing.recipe_id = id;
            state.ingredients.push(ing);
        }
        recipe
    }

    /// Makes `ingredients(recipe_id)` fail like an unreachable backend.
    pub fn fail_ingredients_of(&self, recipe_id: i64) {
        self.state().failing_recipes.insert(recipe_id);
    }

    pub fn foods_snapshot(&self) -> Vec<Food> {
        self.state().foods.clone()
    }
}

#[async_trait]
#[allow(clippy::unwrap_used)]
impl FoodCardStore for MemoryStore {
    async fn all_cards(&self) -> Result<Vec<FoodCard>, LarderError> {
        Ok(self.state().cards.clone())
    }

    async fn cards_by_stock(&self, stock_id: i64) -> Result<Vec<FoodCard>, LarderError> {
        Ok(self
            .state()
            .cards
            .iter()
            .filter(|c| c.owner == CardOwner::Stock(stock_id))
            .cloned()
            .collect())
    }

    async fn cards_by_routine(&self, routine_id: i64) -> Result<Vec<FoodCard>, LarderError> {
        Ok(self
            .state()
            .cards
            .iter()
            .filter(|c| c.owner == CardOwner::Routine(routine_id))
            .cloned()
            .collect())
    }

    async fn cards_by_name(&self, query: &str, threshold: i64) -> Result<Vec<FoodCard>, LarderError> {
        let cards = self.state().cards.clone();
        Ok(rank(query, &cards, |c| c.name.as_str(), threshold)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn insert_card(&self, card: NewFoodCard) -> Result<FoodCard, LarderError> {
        let mut state = self.state();
        let card = card.into_card(state.id());
        state.cards.push(card.clone());
        Ok(card)
    }

    async fn update_quantity(&self, card_id: i64, quantity: &Quantity) -> Result<bool, LarderError> {
        let mut state = self.state();
        match state.cards.iter_mut().find(|c| c.id == card_id) {
            Some(card) => {
                card.quantity = quantity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_card(&self, card_id: i64) -> Result<bool, LarderError> {
        let mut state = self.state();
        let before = state.cards.len();
        state.cards.retain(|c| c.id != card_id);
        Ok(state.cards.len() < before)
    }
}

#[async_trait]
#[allow(clippy::unwrap_used)]
impl InventoryStore for MemoryStore {
    async fn create_stock(&self, name: &str) -> Result<Stock, LarderError> {
        let mut state = self.state();
        let stock = Stock {
            id: state.id(),
            name: name.to_string(),
        };
        state.stocks.push(stock.clone());
        Ok(stock)
    }

    async fn stock_by_name(&self, name: &str) -> Result<Option<Stock>, LarderError> {
        Ok(self
            .state()
            .stocks
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn stocks(&self) -> Result<Vec<Stock>, LarderError> {
        Ok(self.state().stocks.clone())
    }

    async fn delete_stock(&self, stock_id: i64) -> Result<bool, LarderError> {
        let mut state = self.state();
        state.cards.retain(|c| c.owner != CardOwner::Stock(stock_id));
        let before = state.stocks.len();
        state.stocks.retain(|s| s.id != stock_id);
        Ok(state.stocks.len() < before)
    }

    async fn create_routine(&self, routine: Routine) -> Result<Routine, LarderError> {
        let mut state = self.state();
        let routine = Routine {
            id: state.id(),
            ..routine
        };
        state.routines.push(routine.clone());
        Ok(routine)
    }

    async fn routines(&self) -> Result<Vec<Routine>, LarderError> {
        Ok(self.state().routines.clone())
    }

    async fn record_routine_run(
        &self,
        routine_id: i64,
        date: NaiveDate,
        copies: Vec<NewFoodCard>,
    ) -> Result<Vec<FoodCard>, LarderError> {
        let mut state = self.state();
        let mut inserted = Vec::with_capacity(copies.len());
        for copy in copies {
            let card = copy.into_card(state.id());
            state.cards.push(card.clone());
            inserted.push(card);
        }
        if let Some(r) = state.routines.iter_mut().find(|r| r.id == routine_id) {
            r.last_run = Some(date);
        }
        Ok(inserted)
    }

    async fn delete_routine(&self, routine_id: i64) -> Result<bool, LarderError> {
        let mut state = self.state();
        state.cards.retain(|c| c.owner != CardOwner::Routine(routine_id));
        let before = state.routines.len();
        state.routines.retain(|r| r.id != routine_id);
        Ok(state.routines.len() < before)
    }
}

#[async_trait]
#[allow(clippy::unwrap_used)]
impl RecipeCatalog for MemoryStore {
    async fn all_recipes(&self) -> Result<Vec<Recipe>, LarderError> {
        Ok(self.state().recipes.clone())
    }

    async fn ingredients(&self, recipe_id: i64) -> Result<Vec<Ingredient>, LarderError> {
        let state = self.state();
        if state.failing_recipes.contains(&recipe_id) {
            return Err(LarderError::RemoteUnavailable(format!(
                "ingredients of recipe {}",
                recipe_id
            )));
        }
        Ok(state
            .ingredients
            .iter()
            .filter(|i| i.recipe_id == recipe_id)
            .cloned()
            .collect())
    }

    async fn instructions(&self, _recipe_id: i64) -> Result<Vec<Instruction>, LarderError> {
        Ok(Vec::new())
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Recipe>, LarderError> {
        Ok(self
            .state()
            .recipes
            .iter()
            .filter(|r| r.title.eq_ignore_ascii_case(title.trim()))
            .cloned()
            .collect())
    }
}

#[async_trait]
#[allow(clippy::unwrap_used)]
impl FoodCatalog for MemoryStore {
    async fn foods(&self) -> Result<Vec<Food>, LarderError> {
        Ok(self.state().foods.clone())
    }

    async fn upsert_food(&self, food: &Food) -> Result<(), LarderError> {
        let mut state = self.state();
        state.foods.retain(|f| f.id != food.id);
        state.foods.push(food.clone());
        Ok(())
    }

    async fn merge_remote_food(&self, remote: &Food) -> Result<Food, LarderError> {
        let mut state = self.state();
        let linked = state.remote_links.get(&remote.id).copied();
        let id = match linked {
            Some(id) => id,
            None => {
                let adoptable = state
                    .foods
                    .iter()
                    .find(|f| {
                        f.name.eq_ignore_ascii_case(&remote.name)
                            && !state.remote_links.values().any(|local| *local == f.id)
                    })
                    .map(|f| f.id);
                match adoptable {
                    Some(id) => id,
                    None => state.foods.iter().map(|f| f.id).max().unwrap_or(0) + 1,
                }
            }
        };

        let food = Food {
            id,
            ..remote.clone()
        };
        state.remote_links.insert(remote.id, id);
        state.foods.retain(|f| f.id != id);
        state.foods.push(food.clone());
        Ok(food)
    }
}

/// Remote source failing its first `failures` calls.
pub struct FlakyRemote {
    pub foods: Vec<Food>,
    pub failures: usize,
    pub calls: AtomicUsize,
}

impl FlakyRemote {
    pub fn new(foods: Vec<Food>, failures: usize) -> Self {
        Self {
            foods,
            failures,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteFoodSource for FlakyRemote {
    async fn fetch_foods(&self) -> Result<Vec<Food>, LarderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(LarderError::RemoteUnavailable("connection reset".into()));
        }
        Ok(self.foods.clone())
    }
}

// larder-core/src/application/routines.rs

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::application::stock::add_card;
use crate::domain::error::DomainError;
use crate::domain::food::{CardOwner, FoodCard, NewFoodCard, Stock};
use crate::domain::routine::{Routine, RoutineSchedule};
use crate::domain::units::Quantity;
use crate::error::LarderError;
use crate::ports::storage::{FoodCardStore, InventoryStore};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RoutineRunReport {
    pub routines_run: Vec<String>,
    pub cards_added: usize,
}

pub async fn create_routine(
    inventory: &dyn InventoryStore,
    name: &str,
    stock: &Stock,
    schedule: RoutineSchedule,
    start: NaiveDate,
) -> Result<Routine, LarderError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation("routine name must not be empty".into()).into());
    }

    let routine = inventory
        .create_routine(Routine {
            id: 0,
            name: name.to_string(),
            stock_id: stock.id,
            schedule,
            start,
            last_run: None,
            active: true,
        })
        .await?;
    info!(routine = %routine.name, schedule = %routine.schedule, next_due = ?routine.next_due(), "Routine created");
    Ok(routine)
}

/// Adds a template card, copied into the target stock on every run.
pub async fn add_to_routine(
    cards: &dyn FoodCardStore,
    routine: &Routine,
    food_id: i64,
    name: &str,
    quantity: Quantity,
) -> Result<FoodCard, LarderError> {
    add_card(cards, CardOwner::Routine(routine.id), food_id, name, quantity, None).await
}

/// Deletes a routine and its template cards.
pub async fn remove_routine(inventory: &dyn InventoryStore, routine_id: i64) -> Result<(), LarderError> {
    if !inventory.delete_routine(routine_id).await? {
        return Err(DomainError::RoutineNotFound(routine_id).into());
    }
    Ok(())
}

/// Runs every routine due on `today`: its template cards are copied into
/// the routine's stock and the run date is recorded, atomically per routine.
#[instrument(skip(inventory, cards))]
pub async fn run_due_routines(
    inventory: &dyn InventoryStore,
    cards: &dyn FoodCardStore,
    today: NaiveDate,
) -> Result<RoutineRunReport, LarderError> {
    let mut report = RoutineRunReport::default();

    for routine in inventory.routines().await? {
        if !routine.is_due(today) {
            continue;
        }

        let templates = cards.cards_by_routine(routine.id).await?;
        if templates.is_empty() {
            warn!(routine = %routine.name, "Routine has no cards to restock");
        }

        let copies: Vec<NewFoodCard> = templates
            .iter()
            .filter(|c| c.active)
            .map(|template| NewFoodCard {
                owner: CardOwner::Stock(routine.stock_id),
                ..NewFoodCard::from(template)
            })
            .collect();

        let added = inventory.record_routine_run(routine.id, today, copies).await?;
        report.cards_added += added.len();
        info!(routine = %routine.name, cards = added.len(), "Routine run");
        report.routines_run.push(routine.name);
    }

    Ok(report)
}

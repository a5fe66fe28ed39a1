// larder/src/commands/routine.rs
//
// USE CASE: Restock routines.

use comfy_table::Table;
use std::path::Path;

use larder_core::LarderError;
use larder_core::application::{
    add_to_routine, create_routine, remove_routine, resolve_stock, run_due_routines,
};
use larder_core::domain::error::DomainError;
use larder_core::domain::routine::RoutineSchedule;
use larder_core::ports::storage::InventoryStore;

use super::{Larder, parse_quantity, today};
use crate::cli::RoutineCommand;

pub async fn execute(data_dir: &Path, command: RoutineCommand) -> anyhow::Result<()> {
    let larder = Larder::open(data_dir)?;
    let store = &larder.store;

    match command {
        RoutineCommand::Add {
            name,
            stock,
            schedule,
            start,
        } => {
            let schedule: RoutineSchedule = schedule.parse().map_err(LarderError::from)?;
            let stock = resolve_stock(store, &stock, false).await?;
            let start = start.unwrap_or_else(today);
            let routine = create_routine(store, &name, &stock, schedule, start).await?;
            println!(
                "🔁 Routine #{} '{}' restocks '{}' ({})",
                routine.id, routine.name, stock.name, routine.schedule
            );
        }

        RoutineCommand::Item {
            routine_id,
            food,
            quantity,
        } => {
            let quantity = parse_quantity(&quantity)?;
            let routine = store
                .routines()
                .await?
                .into_iter()
                .find(|r| r.id == routine_id)
                .ok_or(LarderError::from(DomainError::RoutineNotFound(routine_id)))?;
            let food_id = store.ensure_food(&food, quantity.unit())?;
            let card = add_to_routine(store, &routine, food_id, &food, quantity).await?;
            println!(
                "✅ '{}' will restock {} ({})",
                routine.name, card.name, card.quantity
            );
        }

        RoutineCommand::List => {
            let routines = store.routines().await?;
            if routines.is_empty() {
                println!("No routine yet");
                return Ok(());
            }
            let mut table = Table::new();
            table.set_header(vec!["id", "name", "schedule", "last run", "next due"]);
            for r in &routines {
                let fmt = |d: Option<chrono::NaiveDate>| {
                    d.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
                };
                table.add_row(vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.schedule.to_string(),
                    fmt(r.last_run),
                    fmt(r.next_due()),
                ]);
            }
            println!("{table}");
        }

        RoutineCommand::Run { today: date } => {
            let date = date.unwrap_or_else(today);
            let report = run_due_routines(store, store, date).await?;
            if report.routines_run.is_empty() {
                println!("No routine due on {}", date);
            } else {
                println!(
                    "🔁 Ran {} ({} cards restocked)",
                    report.routines_run.join(", "),
                    report.cards_added
                );
            }
        }

        RoutineCommand::Remove { routine_id } => {
            remove_routine(store, routine_id).await?;
            println!("🗑️  Routine #{} removed", routine_id);
        }
    }
    Ok(())
}

// larder-core/src/application/mod.rs

pub mod matching;
pub mod routines;
pub mod search;
pub mod stock;
pub mod sync;

#[cfg(test)]
pub(crate) mod mocks;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write `use larder_core::application::{filter_recipes, sync_foods};`
// without knowing the file layout.

pub use matching::{filter_recipes, match_stock};
pub use routines::{
    RoutineRunReport, add_to_routine, create_routine, remove_routine, run_due_routines,
};
pub use search::{search_foods, search_recipes};
pub use stock::{
    add_to_stock, delete_stock, expiring_within, find_cards, list_stock, remove_card,
    resolve_stock, update_card_quantity,
};
pub use sync::{SyncReport, sync_foods};

// larder-core/src/ports/mod.rs

pub mod catalog;
pub mod remote;
pub mod storage;

pub use catalog::{FoodCatalog, RecipeCatalog};
pub use remote::RemoteFoodSource;
pub use storage::{FoodCardStore, InventoryStore};

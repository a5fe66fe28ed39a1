pub mod loader;
pub mod settings;

pub use loader::{load_app_config, load_or_default, write_default_config};
pub use settings::{AppConfig, MatchingConfig, SearchConfig, SyncConfig};

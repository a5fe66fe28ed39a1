// larder-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(larder::infra::database::duckdb),
        help("An error occurred inside the embedded database.")
    )]
    DuckDB(#[from] duckdb::Error),

    #[error("Corrupt row in '{table}': {reason}")]
    #[diagnostic(code(larder::infra::database::corrupt_row))]
    CorruptRow { table: &'static str, reason: String },

    #[error("DuckDB connection lock poisoned")]
    #[diagnostic(code(larder::infra::database::poisoned))]
    Poisoned,
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(larder::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(larder::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Parsing Error: {0}")]
    #[diagnostic(code(larder::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration not found at '{0}'")]
    #[diagnostic(
        code(larder::infra::config_missing),
        help("Run 'larder init' to create one.")
    )]
    ConfigNotFound(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(larder::infra::config_invalid))]
    Validation(#[from] validator::ValidationErrors),

    // --- CATALOG IMPORT ---
    #[error("Import Error in '{path}': {reason}")]
    #[diagnostic(code(larder::infra::import))]
    ImportError { path: String, reason: String },
}

// Manual implementation for shortcuts (e.g. `?` operator on duckdb calls)
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}

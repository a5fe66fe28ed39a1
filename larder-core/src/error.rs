// larder-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LarderError {
    // --- DOMAIN ERRORS (business rules, unknown entities) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, Parsing, Database) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- COLLABORATORS ---
    #[error("Remote source unavailable: {0}")]
    RemoteUnavailable(String),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for LarderError {
    fn from(err: std::io::Error) -> Self {
        LarderError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for LarderError {
    fn from(err: duckdb::Error) -> Self {
        LarderError::Infrastructure(InfrastructureError::from(err))
    }
}

pub mod decode;
pub mod error;
pub mod food;
pub mod recipe;
pub mod routine;
pub mod search;
pub mod units;

// Handy re-exports to simplify imports elsewhere
pub use error::DomainError;

// larder-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid quantity: '{0}'")]
    #[diagnostic(
        code(larder::domain::quantity),
        help("Use '<value> <unit>' (ex: '250 g', '1.5 kg', '2 pieces') or 'to taste'.")
    )]
    InvalidQuantity(String),

    #[error("Unknown unit: '{0}'")]
    #[diagnostic(code(larder::domain::unit))]
    UnknownUnit(String),

    #[error("Invalid schedule: '{0}'")]
    #[diagnostic(
        code(larder::domain::schedule),
        help("Expected one of: daily, every:<days>, weekly:mon,thu, monthly:<day>.")
    )]
    InvalidSchedule(String),

    #[error("Stock '{0}' not found")]
    #[diagnostic(code(larder::domain::stock_not_found))]
    StockNotFound(String),

    #[error("Food card {0} not found")]
    #[diagnostic(code(larder::domain::card_not_found))]
    CardNotFound(i64),

    #[error("Routine {0} not found")]
    #[diagnostic(code(larder::domain::routine_not_found))]
    RoutineNotFound(i64),

    #[error("Invalid input: {0}")]
    #[diagnostic(code(larder::domain::validation))]
    Validation(String),
}

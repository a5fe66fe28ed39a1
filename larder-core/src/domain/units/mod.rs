// larder-core/src/domain/units/mod.rs

pub mod conversion;
pub mod quantity;
pub mod unit;

pub use conversion::{convert_to_base, convert_to_larger_display_unit, quantity_satisfies};
pub use quantity::Quantity;
pub use unit::{MeasurementFamily, Unit};

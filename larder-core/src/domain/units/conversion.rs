// larder-core/src/domain/units/conversion.rs
//
// Unit normalization and compatibility engine. Pure and total.

use crate::domain::units::quantity::Quantity;
use crate::domain::units::unit::{MeasurementFamily, Unit};

/// Converts a quantity to its family's base unit (grams, milliliters, or the
/// raw count).
pub fn convert_to_base(quantity: &Quantity) -> f64 {
    quantity.value() * quantity.unit().base_multiplier()
}

/// Empirical factors for kitchen units, applied to the required side only.
fn required_correction(unit: &Unit) -> f64 {
    match unit {
        Unit::Pinch => 0.2,
        Unit::Mug => 200.0,
        Unit::Cup => 250.0,
        _ => 1.0,
    }
}

// Display ladders: (unit, threshold in base units), smallest first.
static MASS_LADDER: [(Unit, f64); 2] = [(Unit::Gram, 1.0), (Unit::Kilogram, 1000.0)];
static VOLUME_LADDER: [(Unit, f64); 2] = [(Unit::Milliliter, 1.0), (Unit::Liter, 1000.0)];

/// Promotes a metric mass or volume quantity to the largest ladder unit it
/// reaches (1500 g becomes 1.5 kg). Never demotes: 0.5 kg stays 0.5 kg.
/// Identity for every other unit, including kitchen units with no exact
/// metric value. Presentation only.
pub fn convert_to_larger_display_unit(quantity: &Quantity) -> Quantity {
    let ladder: &[(Unit, f64)] = match quantity.unit() {
        Unit::Milligram | Unit::Gram | Unit::Kilogram => &MASS_LADDER,
        Unit::Milliliter | Unit::Centiliter | Unit::Deciliter | Unit::Liter => &VOLUME_LADDER,
        _ => return quantity.clone(),
    };

    let base = convert_to_base(quantity);
    let Some((unit, threshold)) = ladder.iter().rev().find(|(_, t)| base >= *t) else {
        return quantity.clone();
    };
    if *threshold <= quantity.unit().base_multiplier() {
        return quantity.clone();
    }

    Quantity::new(base / threshold, unit.clone())
}

/// Decides whether `held` covers `required`.
///
/// 1. A "to taste" requirement only needs a positive held amount.
/// 2. Unknown units never convert: labels must match and values compare raw.
/// 3. Different families never satisfy each other.
/// 4. Same family: base values compare after the required-side correction.
pub fn quantity_satisfies(required: &Quantity, held: &Quantity) -> bool {
    let req_unit = required.unit();
    let held_unit = held.unit();

    if *req_unit == Unit::ToTaste {
        return held.is_positive();
    }

    if req_unit.is_unknown() || held_unit.is_unknown() {
        return req_unit.as_str() == held_unit.as_str() && held.value() >= required.value();
    }

    let family = req_unit.family();
    if family != held_unit.family()
        || !matches!(
            family,
            MeasurementFamily::Mass | MeasurementFamily::Volume | MeasurementFamily::Count
        )
    {
        return false;
    }

    // Same unit on both sides: no conversion needed.
    if req_unit == held_unit {
        return held.value() >= required.value();
    }

    let required_base = convert_to_base(required) * required_correction(req_unit);
    convert_to_base(held) >= required_base
}

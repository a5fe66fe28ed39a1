// larder-core/src/domain/units/unit.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::domain::error::DomainError;

/// The measurement family a unit belongs to. Quantities are only comparable
/// inside the same family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementFamily {
    Mass,
    Volume,
    Count,
    Qualitative,
    Unknown,
}

/// A measurement unit.
///
/// `Pinch`, `Cup` and `Mug` are kitchen units with no exact metric value: their
/// base multiplier is 1 and the empirical factor is applied by the comparison
/// engine on the required side only.
///
/// `Unknown` keeps the raw label so two unknown units compare textually.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    // Mass (base: gram)
    Milligram,
    Gram,
    Kilogram,
    Pinch,
    // Volume (base: milliliter)
    Milliliter,
    Centiliter,
    Deciliter,
    Liter,
    Teaspoon,
    Tablespoon,
    Cup,
    Mug,
    // Count
    Piece,
    Slice,
    Clove,
    Pack,
    Bunch,
    // Qualitative
    ToTaste,
    Unknown(String),
}

impl Unit {
    pub fn family(&self) -> MeasurementFamily {
        match self {
            Self::Milligram | Self::Gram | Self::Kilogram | Self::Pinch => MeasurementFamily::Mass,
            Self::Milliliter
            | Self::Centiliter
            | Self::Deciliter
            | Self::Liter
            | Self::Teaspoon
            | Self::Tablespoon
            | Self::Cup
            | Self::Mug => MeasurementFamily::Volume,
            Self::Piece | Self::Slice | Self::Clove | Self::Pack | Self::Bunch => {
                MeasurementFamily::Count
            }
            Self::ToTaste => MeasurementFamily::Qualitative,
            Self::Unknown(_) => MeasurementFamily::Unknown,
        }
    }

    /// Scalar converting a value in this unit to the family's base unit.
    pub fn base_multiplier(&self) -> f64 {
        match self {
            Self::Milligram => 0.001,
            Self::Kilogram => 1000.0,
            Self::Centiliter => 10.0,
            Self::Deciliter => 100.0,
            Self::Liter => 1000.0,
            Self::Teaspoon => 5.0,
            Self::Tablespoon => 15.0,
            _ => 1.0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Milligram => "mg",
            Self::Gram => "g",
            Self::Kilogram => "kg",
            Self::Pinch => "pinch",
            Self::Milliliter => "ml",
            Self::Centiliter => "cl",
            Self::Deciliter => "dl",
            Self::Liter => "l",
            Self::Teaspoon => "tsp",
            Self::Tablespoon => "tbsp",
            Self::Cup => "cup",
            Self::Mug => "mug",
            Self::Piece => "piece",
            Self::Slice => "slice",
            Self::Clove => "clove",
            Self::Pack => "pack",
            Self::Bunch => "bunch",
            Self::ToTaste => "to_taste",
            Self::Unknown(raw) => raw.as_str(),
        }
    }

    /// Lenient ingestion of external data: unrecognised labels become
    /// `Unknown(raw)` and the fallback is logged.
    pub fn parse_lenient(raw: &str) -> Self {
        match Self::from_str(raw) {
            Ok(unit) => unit,
            Err(_) => {
                warn!(unit = raw, "Unrecognised unit, falling back to Unknown");
                Self::Unknown(raw.trim().to_string())
            }
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Unit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim().to_lowercase().as_str() {
            "mg" | "milligram" | "milligrams" => Self::Milligram,
            "g" | "gr" | "gram" | "grams" => Self::Gram,
            "kg" | "kilogram" | "kilograms" => Self::Kilogram,
            "pinch" | "pinches" => Self::Pinch,
            "ml" | "milliliter" | "milliliters" | "millilitre" => Self::Milliliter,
            "cl" | "centiliter" | "centiliters" => Self::Centiliter,
            "dl" | "deciliter" | "deciliters" => Self::Deciliter,
            "l" | "liter" | "liters" | "litre" | "litres" => Self::Liter,
            "tsp" | "teaspoon" | "teaspoons" => Self::Teaspoon,
            "tbsp" | "tablespoon" | "tablespoons" => Self::Tablespoon,
            "cup" | "cups" => Self::Cup,
            "mug" | "mugs" => Self::Mug,
            "piece" | "pieces" | "pcs" | "pc" => Self::Piece,
            "slice" | "slices" => Self::Slice,
            "clove" | "cloves" => Self::Clove,
            "pack" | "packs" => Self::Pack,
            "bunch" | "bunches" => Self::Bunch,
            "to_taste" | "to taste" => Self::ToTaste,
            _ => return Err(DomainError::UnknownUnit(s.to_string())),
        };
        Ok(unit)
    }
}

impl From<String> for Unit {
    fn from(raw: String) -> Self {
        Self::parse_lenient(&raw)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.as_str().to_string()
    }
}

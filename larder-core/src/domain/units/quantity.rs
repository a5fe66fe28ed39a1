// larder-core/src/domain/units/quantity.rs

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::domain::error::DomainError;
use crate::domain::units::unit::Unit;

fn re_quantity() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\d+(?:[.,]\d+)?)\s*([^\d\s].*?)?\s*$")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

/// A non-negative amount in a given unit.
///
/// Absent, negative and non-finite values are clamped to 0.0 on construction so
/// every comparison downstream stays total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawQuantity")]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

// Wire shape: `value` may be null or missing.
#[derive(Deserialize)]
struct RawQuantity {
    #[serde(default)]
    value: Option<f64>,
    unit: Unit,
}

impl From<RawQuantity> for Quantity {
    fn from(raw: RawQuantity) -> Self {
        Self::from_optional(raw.value, raw.unit)
    }
}

pub(crate) fn sanitize(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self::from_optional(Some(value), unit)
    }

    pub fn from_optional(value: Option<f64>, unit: Unit) -> Self {
        Self {
            value: sanitize(value),
            unit,
        }
    }

    pub fn to_taste() -> Self {
        Self::new(1.0, Unit::ToTaste)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn is_positive(&self) -> bool {
        self.value > 0.0
    }

    pub fn with_value(&self, value: f64) -> Self {
        Self::new(value, self.unit.clone())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::ToTaste => write!(f, "to taste"),
            _ => write!(f, "{} {}", self.value, self.unit),
        }
    }
}

impl FromStr for Quantity {
    type Err = DomainError;

    /// Parses `"250 g"`, `"1,5kg"`, `"3"` (pieces) or `"to taste"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("to taste") {
            return Ok(Self::to_taste());
        }

        let caps = re_quantity()
            .captures(s)
            .ok_or_else(|| DomainError::InvalidQuantity(s.to_string()))?;

        let value: f64 = caps[1]
            .replace(',', ".")
            .parse()
            .map_err(|_| DomainError::InvalidQuantity(s.to_string()))?;

        let unit = match caps.get(2) {
            Some(m) => Unit::from_str(m.as_str())?,
            None => Unit::Piece,
        };

        Ok(Self::new(value, unit))
    }
}

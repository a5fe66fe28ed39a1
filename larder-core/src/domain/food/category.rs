// larder-core/src/domain/food/category.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Vegetable,
    Fruit,
    Dairy,
    Meat,
    Fish,
    Grain,
    Spice,
    Beverage,
    Other,
    #[default]
    Unknown,
}

impl FoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vegetable => "vegetable",
            Self::Fruit => "fruit",
            Self::Dairy => "dairy",
            Self::Meat => "meat",
            Self::Fish => "fish",
            Self::Grain => "grain",
            Self::Spice => "spice",
            Self::Beverage => "beverage",
            Self::Other => "other",
            Self::Unknown => "unknown",
        }
    }

    /// Unrecognised labels become `Unknown` and the fallback is logged.
    pub fn parse_lenient(raw: &str) -> Self {
        Self::from_str(raw.trim()).unwrap_or_else(|_| {
            warn!(category = raw, "Unrecognised food category, falling back to Unknown");
            Self::Unknown
        })
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vegetable" => Ok(Self::Vegetable),
            "fruit" => Ok(Self::Fruit),
            "dairy" => Ok(Self::Dairy),
            "meat" => Ok(Self::Meat),
            "fish" => Ok(Self::Fish),
            "grain" => Ok(Self::Grain),
            "spice" => Ok(Self::Spice),
            "beverage" => Ok(Self::Beverage),
            "other" => Ok(Self::Other),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Unknown food category: {}", s)),
        }
    }
}

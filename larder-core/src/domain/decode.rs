// larder-core/src/domain/decode.rs
//
// Typed decoding of untyped change payloads (remote feed, imports).
// Structural problems fail the decode; unknown unit or category labels are
// accepted as `Unknown` but counted and logged.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

use crate::domain::food::{CardOwner, Food, FoodCard, FoodCategory};
use crate::domain::units::{Quantity, Unit};

#[derive(Error, Debug, PartialEq)]
pub enum DecodeError {
    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Food card must belong to exactly one of stock_id / routine_id")]
    AmbiguousOwner,
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Malformed(err.to_string())
    }
}

/// Counts lenient fallbacks so data-quality regressions stay visible.
#[derive(Debug, Default)]
pub struct DecodeStats {
    unknown_units: AtomicU64,
    unknown_categories: AtomicU64,
}

impl DecodeStats {
    pub fn unknown_units(&self) -> u64 {
        self.unknown_units.load(Ordering::Relaxed)
    }

    pub fn unknown_categories(&self) -> u64 {
        self.unknown_categories.load(Ordering::Relaxed)
    }

    fn unit(&self, raw: &str) -> Unit {
        let unit = Unit::parse_lenient(raw);
        if unit.is_unknown() {
            self.unknown_units.fetch_add(1, Ordering::Relaxed);
        }
        unit
    }

    fn category(&self, raw: &str) -> FoodCategory {
        let category = FoodCategory::parse_lenient(raw);
        if category == FoodCategory::Unknown && !raw.trim().eq_ignore_ascii_case("unknown") {
            self.unknown_categories.fetch_add(1, Ordering::Relaxed);
        }
        category
    }
}

// --- WIRE RECORDS ---
// Labels stay raw strings so the lenient fallbacks go through `DecodeStats`.

#[derive(Debug, Deserialize)]
struct FoodPayload {
    id: i64,
    name: String,
    category: Option<String>,
    default_unit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FoodCardPayload {
    id: i64,
    food_id: i64,
    name: String,
    quantity: Option<f64>,
    unit: String,
    expiry: Option<NaiveDate>,
    active: Option<bool>,
    stock_id: Option<i64>,
    routine_id: Option<i64>,
}

// --- RECORD DECODERS ---

pub fn decode_food(payload: &Value, stats: &DecodeStats) -> Result<Food, DecodeError> {
    let raw = FoodPayload::deserialize(payload)?;

    Ok(Food {
        id: raw.id,
        name: raw.name,
        category: raw
            .category
            .map(|label| stats.category(&label))
            .unwrap_or_default(),
        default_unit: raw
            .default_unit
            .map(|label| stats.unit(&label))
            .unwrap_or(Unit::Piece),
    })
}

pub fn decode_food_card(payload: &Value, stats: &DecodeStats) -> Result<FoodCard, DecodeError> {
    let raw = FoodCardPayload::deserialize(payload)?;

    let owner = match (raw.stock_id, raw.routine_id) {
        (Some(stock), None) => CardOwner::Stock(stock),
        (None, Some(routine)) => CardOwner::Routine(routine),
        _ => return Err(DecodeError::AmbiguousOwner),
    };

    Ok(FoodCard {
        id: raw.id,
        food_id: raw.food_id,
        name: raw.name,
        quantity: Quantity::from_optional(raw.quantity, stats.unit(&raw.unit)),
        expiry: raw.expiry,
        active: raw.active.unwrap_or(true),
        owner,
    })
}

// larder-core/src/application/stock.rs

use chrono::{Days, NaiveDate};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::error::DomainError;
use crate::domain::food::{CardOwner, FoodCard, NewFoodCard, Stock};
use crate::domain::units::Quantity;
use crate::error::LarderError;
use crate::ports::storage::{FoodCardStore, InventoryStore};

/// Looks a stock up by name, creating it when `create` is set.
pub async fn resolve_stock(
    inventory: &dyn InventoryStore,
    name: &str,
    create: bool,
) -> Result<Stock, LarderError> {
    let name = name.trim();
    if let Some(stock) = inventory.stock_by_name(name).await? {
        return Ok(stock);
    }
    if !create {
        return Err(DomainError::StockNotFound(name.to_string()).into());
    }
    if name.is_empty() {
        return Err(DomainError::Validation("stock name must not be empty".into()).into());
    }

    let stock = inventory.create_stock(name).await?;
    info!(stock = %stock.name, id = stock.id, "Stock created");
    Ok(stock)
}

/// Validates and stores a new card for `owner`.
pub(crate) async fn add_card(
    cards: &dyn FoodCardStore,
    owner: CardOwner,
    food_id: i64,
    name: &str,
    quantity: Quantity,
    expiry: Option<NaiveDate>,
) -> Result<FoodCard, LarderError> {
    let card = NewFoodCard {
        food_id,
        name: name.trim().to_string(),
        quantity,
        expiry,
        owner,
    };
    card.validate()
        .map_err(|e| DomainError::Validation(e.to_string()))?;

    cards.insert_card(card).await
}

#[instrument(skip(cards, stock), fields(stock = %stock.name))]
pub async fn add_to_stock(
    cards: &dyn FoodCardStore,
    stock: &Stock,
    food_id: i64,
    name: &str,
    quantity: Quantity,
    expiry: Option<NaiveDate>,
) -> Result<FoodCard, LarderError> {
    let card = add_card(cards, CardOwner::Stock(stock.id), food_id, name, quantity, expiry).await?;
    info!(card_id = card.id, quantity = %card.quantity, "Added to stock");
    Ok(card)
}

pub async fn list_stock(cards: &dyn FoodCardStore, stock: &Stock) -> Result<Vec<FoodCard>, LarderError> {
    cards.cards_by_stock(stock.id).await
}

/// Stock cards whose name scores at least `threshold` against `query`,
/// best first.
pub async fn find_cards(
    cards: &dyn FoodCardStore,
    query: &str,
    threshold: i64,
) -> Result<Vec<FoodCard>, LarderError> {
    Ok(cards
        .cards_by_name(query, threshold)
        .await?
        .into_iter()
        .filter(|c| matches!(c.owner, CardOwner::Stock(_)))
        .collect())
}

pub async fn remove_card(cards: &dyn FoodCardStore, card_id: i64) -> Result<(), LarderError> {
    if !cards.delete_card(card_id).await? {
        return Err(DomainError::CardNotFound(card_id).into());
    }
    info!(card_id, "Card removed");
    Ok(())
}

pub async fn update_card_quantity(
    cards: &dyn FoodCardStore,
    card_id: i64,
    quantity: &Quantity,
) -> Result<(), LarderError> {
    if !cards.update_quantity(card_id, quantity).await? {
        return Err(DomainError::CardNotFound(card_id).into());
    }
    Ok(())
}

/// Deletes a stock and every card in it.
pub async fn delete_stock(inventory: &dyn InventoryStore, name: &str) -> Result<(), LarderError> {
    let stock = resolve_stock(inventory, name, false).await?;
    inventory.delete_stock(stock.id).await?;
    info!(stock = %stock.name, "Stock deleted");
    Ok(())
}

/// Active stock cards expiring on or before `today + days`, soonest first.
pub async fn expiring_within(
    cards: &dyn FoodCardStore,
    days: u32,
    today: NaiveDate,
) -> Result<Vec<FoodCard>, LarderError> {
    let limit = today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX);

    let mut expiring: Vec<FoodCard> = cards
        .all_cards()
        .await?
        .into_iter()
        .filter(|c| c.active && matches!(c.owner, CardOwner::Stock(_)) && c.expires_by(limit))
        .collect();
    expiring.sort_by_key(|c| c.expiry);
    Ok(expiring)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::mocks::MemoryStore;
    use crate::domain::search::RANK_THRESHOLD;
    use crate::domain::units::Unit;
    use anyhow::Result;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn liters(v: f64) -> Quantity {
        Quantity::new(v, Unit::Liter)
    }

    #[tokio::test]
    async fn test_resolve_stock() -> Result<()> {
        let store = MemoryStore::default();
        assert!(matches!(
            resolve_stock(&store, "fridge", false).await,
            Err(LarderError::Domain(DomainError::StockNotFound(_)))
        ));

        let created = resolve_stock(&store, "fridge", true).await?;
        let found = resolve_stock(&store, "FRIDGE", false).await?;
        assert_eq!(created, found);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_rejects_blank_name() -> Result<()> {
        let store = MemoryStore::default();
        let fridge = resolve_stock(&store, "fridge", true).await?;

        let err = add_to_stock(&store, &fridge, 1, "   ", liters(1.0), None).await;
        assert!(matches!(err, Err(LarderError::Domain(DomainError::Validation(_)))));

        add_to_stock(&store, &fridge, 1, "Milk", liters(1.0), None).await?;
        assert_eq!(list_stock(&store, &fridge).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_remove_unknown_card() -> Result<()> {
        let store = MemoryStore::default();
        let fridge = resolve_stock(&store, "fridge", true).await?;
        let card = add_to_stock(&store, &fridge, 1, "Milk", liters(1.0), None).await?;

        update_card_quantity(&store, card.id, &liters(0.5)).await?;
        assert_eq!(list_stock(&store, &fridge).await?[0].quantity, liters(0.5));

        remove_card(&store, card.id).await?;
        assert!(matches!(
            remove_card(&store, card.id).await,
            Err(LarderError::Domain(DomainError::CardNotFound(_)))
        ));
        assert!(update_card_quantity(&store, card.id, &liters(1.0)).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_expiring_within_orders_by_date() -> Result<()> {
        let store = MemoryStore::default();
        let fridge = resolve_stock(&store, "fridge", true).await?;
        add_to_stock(&store, &fridge, 1, "Yogurt", liters(0.5), Some(date(18))).await?;
        add_to_stock(&store, &fridge, 2, "Milk", liters(1.0), Some(date(16))).await?;
        add_to_stock(&store, &fridge, 3, "Cheese", liters(1.0), Some(date(30))).await?;
        add_to_stock(&store, &fridge, 4, "Honey", liters(1.0), None).await?;

        let names: Vec<String> = expiring_within(&store, 5, date(14))
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Milk", "Yogurt"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_stock_drops_its_cards() -> Result<()> {
        let store = MemoryStore::default();
        let fridge = resolve_stock(&store, "fridge", true).await?;
        add_to_stock(&store, &fridge, 1, "Milk", liters(1.0), None).await?;

        delete_stock(&store, "fridge").await?;
        assert!(store.all_cards().await?.is_empty());
        assert!(delete_stock(&store, "fridge").await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_find_cards() -> Result<()> {
        let store = MemoryStore::default();
        let fridge = resolve_stock(&store, "fridge", true).await?;
        add_to_stock(&store, &fridge, 1, "Oat milk", liters(1.0), None).await?;
        add_to_stock(&store, &fridge, 2, "Butter", liters(1.0), None).await?;

        let hits = find_cards(&store, "milk", RANK_THRESHOLD).await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Oat milk");

        assert!(find_cards(&store, "milk", 100).await?.is_empty());
        Ok(())
    }
}

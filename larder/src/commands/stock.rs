// larder/src/commands/stock.rs
//
// USE CASE: Add, inspect and remove stocked food cards.

use std::path::Path;

use larder_core::application::{
    add_to_stock, delete_stock, expiring_within, find_cards, list_stock, remove_card,
    resolve_stock, update_card_quantity,
};

use super::{Larder, cards_table, parse_quantity, today};
use crate::cli::StockCommand;

pub async fn execute(data_dir: &Path, command: StockCommand) -> anyhow::Result<()> {
    let larder = Larder::open(data_dir)?;
    let store = &larder.store;

    match command {
        StockCommand::Add {
            stock,
            food,
            quantity,
            expiry,
            create,
        } => {
            let quantity = parse_quantity(&quantity)?;
            let stock = resolve_stock(store, &stock, create).await?;
            let food_id = store.ensure_food(&food, quantity.unit())?;
            let card = add_to_stock(store, &stock, food_id, &food, quantity, expiry).await?;
            println!(
                "✅ Added {} ({}) to '{}' as card #{}",
                card.name, card.quantity, stock.name, card.id
            );
        }

        StockCommand::List { stock } => {
            let stock = resolve_stock(store, &stock, false).await?;
            let cards = list_stock(store, &stock).await?;
            if cards.is_empty() {
                println!("'{}' is empty", stock.name);
            } else {
                println!("{}", cards_table(&cards));
            }
        }

        StockCommand::Find { query } => {
            let cards = find_cards(store, &query, larder.config.search.rank_threshold).await?;
            if cards.is_empty() {
                println!("No card matches '{}'", query);
            } else {
                println!("{}", cards_table(&cards));
            }
        }

        StockCommand::Set { card_id, quantity } => {
            let quantity = parse_quantity(&quantity)?;
            update_card_quantity(store, card_id, &quantity).await?;
            println!("✅ Card #{} now holds {}", card_id, quantity);
        }

        StockCommand::Remove { card_id } => {
            remove_card(store, card_id).await?;
            println!("🗑️  Card #{} removed", card_id);
        }

        StockCommand::Drop { stock } => {
            delete_stock(store, &stock).await?;
            println!("🗑️  Stock '{}' deleted", stock);
        }

        StockCommand::Expiring { days, today: date } => {
            let date = date.unwrap_or_else(today);
            let cards = expiring_within(store, days, date).await?;
            if cards.is_empty() {
                println!("Nothing expires within {} days", days);
            } else {
                println!("{}", cards_table(&cards));
            }
        }
    }
    Ok(())
}

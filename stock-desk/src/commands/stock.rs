use crate::cli::StockAction;
use crate::desk::Desk;
use crate::utils::format::{Table, money};
use anyhow::Context;
use shared::models::{ItemCreate, ItemUpdate};
use stock_client::StockApi;

pub async fn run(desk: &mut Desk, action: StockAction) -> anyhow::Result<()> {
    match action {
        StockAction::List => list(desk).await,
        StockAction::Add {
            name,
            quantity,
            price,
            description,
        } => {
            let item = ItemCreate {
                name,
                quantity,
                price,
                description,
            };
            desk.api().add_stock(&item).await?;
            println!("Added {}", item.name);
            Ok(())
        }
        StockAction::Edit {
            id,
            name,
            quantity,
            price,
            description,
        } => {
            let items = desk.api().list_stock().await?;
            let current = items
                .iter()
                .find(|i| i.id == id)
                .with_context(|| format!("No stock item with id {}", id))?;

            let mut update = ItemUpdate::from(current);
            if let Some(name) = name {
                update.name = name;
            }
            if let Some(quantity) = quantity {
                update.quantity = quantity;
            }
            if let Some(price) = price {
                update.price = price;
            }
            if description.is_some() {
                update.description = description;
            }

            desk.api().edit_stock_item(&update).await?;
            println!("Updated {}", update.name);
            Ok(())
        }
        StockAction::Delete { id } => {
            desk.api().delete_stock_item(id).await?;
            println!("Deleted item {}", id);
            Ok(())
        }
    }
}

async fn list(desk: &mut Desk) -> anyhow::Result<()> {
    let items = desk.api().list_stock().await?;

    let mut table = Table::new(&["ID", "NAME", "QTY", "PRICE", "DESCRIPTION"]);
    for item in &items {
        table.row([
            item.id.to_string(),
            item.name.clone(),
            item.quantity.to_string(),
            money(item.price),
            item.description.clone().unwrap_or_default(),
        ]);
    }

    if table.is_empty() {
        println!("No stock items");
    } else {
        print!("{}", table.render());
    }
    Ok(())
}

use crate::cli::TableAction;
use crate::desk::Desk;
use crate::utils::format::{Table, money};
use shared::models::{Item, Order, TabCreate};
use shared::{JoinKey, compute_total, display_name, line_total};
use std::collections::HashMap;
use stock_client::StockApi;

pub async fn run(desk: &mut Desk, action: TableAction) -> anyhow::Result<()> {
    match action {
        TableAction::List => list(desk).await,
        TableAction::Open { number, waiter } => {
            desk.tables()
                .open_tab(TabCreate {
                    number,
                    waiter_id: waiter,
                })
                .await?;
            println!("Opened table {}", number);
            Ok(())
        }
        TableAction::AddItem {
            table,
            item,
            quantity,
        } => {
            desk.tables().add_item(table, item, quantity).await?;
            println!("Added {} x item {} to table {}", quantity, item, table);
            Ok(())
        }
        TableAction::Orders { table } => orders(desk, table).await,
        TableAction::DeleteOrder { order } => {
            match desk.tables().delete_order(order).await? {
                Some(table) => println!("Deleted order {} from table {}", order, table),
                None => println!("Deleted order {}", order),
            }
            Ok(())
        }
        TableAction::Clear { table } => {
            desk.tables().clear_table(table).await?;
            println!("Table {} cleared", table);
            Ok(())
        }
    }
}

async fn list(desk: &mut Desk) -> anyhow::Result<()> {
    let tables = desk.tables().refresh_tables().await?;
    let waiters: HashMap<_, _> = desk
        .api()
        .list_waiters()
        .await?
        .into_iter()
        .map(|w| (w.id, w.name))
        .collect();

    if tables.is_empty() {
        println!("No tables");
        return Ok(());
    }

    let mut listing = Table::new(&["NUMBER", "ID", "WAITER", "STATUS"]);
    for t in &tables {
        let waiter = waiters
            .get(&t.waiter_id)
            .cloned()
            .or_else(|| t.name.clone())
            .unwrap_or_else(|| format!("#{}", t.waiter_id));
        listing.row([
            t.number.to_string(),
            t.id.to_string(),
            waiter,
            t.status().to_string(),
        ]);
    }
    print!("{}", listing.render());
    Ok(())
}

async fn orders(desk: &mut Desk, table_id: shared::types::TableId) -> anyhow::Result<()> {
    let orders = desk.tables().orders_for_table(table_id).await?.to_vec();
    if orders.is_empty() {
        println!("Table {} has no orders", table_id);
        return Ok(());
    }

    let items = desk.api().list_stock().await?;
    let key = desk.tables().join_key();

    let mut listing = Table::new(&["ORDER", "ITEM", "QTY", "AMOUNT"]);
    for order in &orders {
        listing.row(order_row(order, &items, key));
    }
    print!("{}", listing.render());
    println!("Total: {}", money(compute_total(&orders, &items, key)));
    Ok(())
}

fn order_row(order: &Order, items: &[Item], key: JoinKey) -> [String; 4] {
    [
        order.id.to_string(),
        display_name(order, items, key),
        order.quantity.to_string(),
        money(line_total(order, items, key)),
    ]
}

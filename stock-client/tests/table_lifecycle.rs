// stock-client/tests/table_lifecycle.rs
// Table desk against an in-memory API

use async_trait::async_trait;
use shared::{Decimal, compute_total};
use shared::models::{
    AddToTable, DiningTable, Item, ItemCreate, ItemUpdate, Order, TabCreate, TableStatus, Waiter,
    WaiterCreate,
};
use shared::types::{ItemId, OrderId, TableId, WaiterId};
use std::sync::Mutex;
use stock_client::{ClientError, ClientResult, JoinKey, StockApi, TableDesk};

#[derive(Default)]
struct FakeState {
    items: Vec<Item>,
    waiters: Vec<Waiter>,
    tables: Vec<DiningTable>,
    orders: Vec<Order>,
    next_id: i64,
    fetches: usize,
    fail: bool,
}

#[derive(Default)]
struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    fn seeded() -> Self {
        let api = FakeApi::default();
        {
            let mut s = api.state.lock().unwrap();
            s.items = vec![
                item(1, "Coke", 500),
                item(2, "Water", 200),
            ];
            s.waiters = vec![Waiter {
                id: 1,
                name: "Ada".into(),
            }];
            s.tables = vec![table(5, 12, 1), table(6, 3, 1)];
            s.orders = vec![Order::new(100, 5, 1, 3), Order::new(101, 5, 2, 1)];
            s.next_id = 200;
        }
        api
    }

    fn fetches(&self) -> usize {
        self.state.lock().unwrap().fetches
    }

    fn set_fail(&self, fail: bool) {
        self.state.lock().unwrap().fail = fail;
    }

    fn server_orders(&self, table_id: TableId) -> usize {
        self.state
            .lock()
            .unwrap()
            .orders
            .iter()
            .filter(|o| o.table_id == table_id)
            .count()
    }

    fn check(&self) -> ClientResult<std::sync::MutexGuard<'_, FakeState>> {
        let state = self.state.lock().unwrap();
        if state.fail {
            return Err(ClientError::Server {
                status: 500,
                message: "unavailable".into(),
            });
        }
        Ok(state)
    }
}

fn item(id: ItemId, name: &str, price: i64) -> Item {
    Item {
        id,
        name: name.into(),
        quantity: 50,
        price: Decimal::from(price),
        description: None,
    }
}

fn table(id: TableId, number: u32, waiter_id: WaiterId) -> DiningTable {
    DiningTable {
        id,
        number,
        waiter_id,
        cleared: false,
        name: None,
    }
}

#[async_trait]
impl StockApi for FakeApi {
    async fn list_stock(&self) -> ClientResult<Vec<Item>> {
        Ok(self.check()?.items.clone())
    }

    async fn add_stock(&self, item: &ItemCreate) -> ClientResult<()> {
        let mut s = self.check()?;
        s.next_id += 1;
        let id = s.next_id;
        s.items.push(Item {
            id,
            name: item.name.clone(),
            quantity: item.quantity,
            price: item.price,
            description: item.description.clone(),
        });
        Ok(())
    }

    async fn edit_stock_item(&self, item: &ItemUpdate) -> ClientResult<()> {
        let mut s = self.check()?;
        match s.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => {
                existing.price = item.price;
                Ok(())
            }
            None => Err(ClientError::NotFound(format!("item {}", item.id))),
        }
    }

    async fn delete_stock_item(&self, id: ItemId) -> ClientResult<()> {
        self.check()?.items.retain(|i| i.id != id);
        Ok(())
    }

    async fn list_waiters(&self) -> ClientResult<Vec<Waiter>> {
        Ok(self.check()?.waiters.clone())
    }

    async fn create_waiter(&self, waiter: &WaiterCreate) -> ClientResult<()> {
        let mut s = self.check()?;
        s.next_id += 1;
        let id = s.next_id;
        s.waiters.push(Waiter {
            id,
            name: waiter.name.clone(),
        });
        Ok(())
    }

    async fn delete_waiter(&self, id: WaiterId) -> ClientResult<()> {
        self.check()?.waiters.retain(|w| w.id != id);
        Ok(())
    }

    async fn list_tables(&self) -> ClientResult<Vec<DiningTable>> {
        Ok(self.check()?.tables.clone())
    }

    async fn create_waiter_tab(&self, tab: &TabCreate) -> ClientResult<()> {
        let mut s = self.check()?;
        s.next_id += 1;
        let id = s.next_id;
        s.tables.push(table(id, tab.number, tab.waiter_id));
        Ok(())
    }

    async fn clear_table(&self, id: TableId) -> ClientResult<()> {
        let mut s = self.check()?;
        if let Some(t) = s.tables.iter_mut().find(|t| t.id == id) {
            t.cleared = true;
        }
        Ok(())
    }

    async fn table_items(&self, table_id: TableId) -> ClientResult<Vec<Order>> {
        let mut s = self.check()?;
        s.fetches += 1;
        // Rows come back without the table id, like the real endpoint
        Ok(s.orders
            .iter()
            .filter(|o| o.table_id == table_id)
            .map(|o| Order { table_id: 0, ..o.clone() })
            .collect())
    }

    async fn add_to_table(&self, request: &AddToTable) -> ClientResult<()> {
        let mut s = self.check()?;
        s.next_id += 1;
        let id = s.next_id;
        s.orders.push(Order::new(
            id,
            request.table_id,
            request.item_id,
            request.quantity,
        ));
        Ok(())
    }

    async fn delete_order(&self, order_id: OrderId) -> ClientResult<()> {
        self.check()?.orders.retain(|o| o.id != order_id);
        Ok(())
    }

    async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        Ok(self.check()?.orders.clone())
    }

    async fn table_orders(&self, table_id: TableId) -> ClientResult<Vec<Order>> {
        let s = self.check()?;
        Ok(s.orders
            .iter()
            .filter(|o| o.table_id == table_id)
            .map(|o| {
                // Server-side join: name and price, no item id
                let joined = s.items.iter().find(|i| Some(i.id) == o.item_id);
                Order {
                    item_id: None,
                    item_name: joined.map(|i| i.name.clone()),
                    price: joined.map(|i| i.price),
                    ..o.clone()
                }
            })
            .collect())
    }

    async fn delete_table_orders(&self, table_id: TableId) -> ClientResult<()> {
        self.check()?.orders.retain(|o| o.table_id != table_id);
        Ok(())
    }
}

fn order_ids(orders: &[Order]) -> Vec<OrderId> {
    orders.iter().map(|o| o.id).collect()
}

#[tokio::test]
async fn test_orders_are_cached_and_stamped() {
    let mut desk = TableDesk::new(FakeApi::seeded());

    let orders = desk.orders_for_table(5).await.unwrap();
    assert_eq!(order_ids(orders), vec![100, 101]);
    assert!(orders.iter().all(|o| o.table_id == 5));

    desk.orders_for_table(5).await.unwrap();
    assert_eq!(desk.api().fetches(), 1);
}

#[tokio::test]
async fn test_clear_table_empties_cache() {
    let mut desk = TableDesk::new(FakeApi::seeded());
    desk.refresh_tables().await.unwrap();
    assert_eq!(desk.orders_for_table(5).await.unwrap().len(), 2);

    desk.clear_table(5).await.unwrap();

    assert_eq!(desk.status(5), Some(TableStatus::Cleared));
    assert_eq!(desk.order_book().cached(5), Some(&[][..]));
    assert!(desk.orders_for_table(5).await.unwrap().is_empty());
    assert_eq!(desk.api().fetches(), 1);
}

#[tokio::test]
async fn test_add_then_delete_restores_list() {
    let mut desk = TableDesk::new(FakeApi::seeded());
    let before = order_ids(desk.orders_for_table(5).await.unwrap());

    desk.add_item(5, 1, 2).await.unwrap();
    assert!(!desk.order_book().is_cached(5));

    let after_add = desk.orders_for_table(5).await.unwrap().to_vec();
    assert_eq!(after_add.len(), before.len() + 1);
    let added = after_add.last().unwrap();
    assert_eq!(added.item_id, Some(1));
    assert_eq!(added.quantity, 2);

    let owner = desk.delete_order(added.id).await.unwrap();
    assert_eq!(owner, Some(5));
    assert_eq!(order_ids(desk.orders_for_table(5).await.unwrap()), before);
    assert_eq!(desk.api().fetches(), 3);
}

#[tokio::test]
async fn test_failed_call_leaves_state_unchanged() {
    let mut desk = TableDesk::new(FakeApi::seeded());
    desk.refresh_tables().await.unwrap();
    desk.orders_for_table(5).await.unwrap();

    desk.api().set_fail(true);
    assert!(desk.add_item(5, 1, 1).await.is_err());
    assert!(desk.delete_order(100).await.is_err());
    assert!(desk.clear_table(5).await.is_err());

    assert_eq!(desk.order_book().cached(5).map(<[Order]>::len), Some(2));
    assert_eq!(desk.status(5), Some(TableStatus::Active));

    desk.api().set_fail(false);
    assert_eq!(desk.orders_for_table(5).await.unwrap().len(), 2);
    assert_eq!(desk.api().fetches(), 1);
}

#[tokio::test]
async fn test_invalid_quantity_never_reaches_api() {
    let mut desk = TableDesk::new(FakeApi::seeded());
    desk.orders_for_table(5).await.unwrap();

    let err = desk.add_item(5, 1, 0).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(desk.order_book().is_cached(5));
    assert_eq!(desk.api().server_orders(5), 2);
}

#[tokio::test]
async fn test_hooks_do_not_touch_other_tables() {
    let mut desk = TableDesk::new(FakeApi::seeded());
    desk.orders_for_table(5).await.unwrap();
    desk.orders_for_table(6).await.unwrap();

    desk.add_item(6, 2, 1).await.unwrap();
    assert!(desk.order_book().is_cached(5));
    assert!(!desk.order_book().is_cached(6));

    desk.clear_table(6).await.unwrap();
    assert_eq!(desk.order_book().cached(5).map(<[Order]>::len), Some(2));
}

#[tokio::test]
async fn test_delete_uncached_order_invalidates_nothing() {
    let mut desk = TableDesk::new(FakeApi::seeded());
    desk.orders_for_table(6).await.unwrap();

    let owner = desk.delete_order(100).await.unwrap();
    assert_eq!(owner, None);
    assert!(desk.order_book().is_cached(6));
    assert_eq!(desk.api().server_orders(5), 1);
}

#[tokio::test]
async fn test_finalize_then_settle() {
    let mut desk = TableDesk::new(FakeApi::seeded());

    let receipt = desk.finalize_receipt(5).await.unwrap();
    assert_eq!(receipt.table_number, 12);
    assert_eq!(receipt.waiter_name.as_deref(), Some("Ada"));
    assert_eq!(receipt.lines.len(), 2);
    assert_eq!(receipt.lines[0].line_total, Decimal::from(1500));
    assert_eq!(receipt.total, Decimal::from(1700));

    // Finalizing alone deletes nothing
    assert_eq!(desk.api().server_orders(5), 2);
    assert_eq!(desk.status(5), Some(TableStatus::Active));

    desk.settle_table(&receipt).await.unwrap();
    assert_eq!(desk.api().server_orders(5), 0);
    assert_eq!(desk.status(5), Some(TableStatus::Cleared));
    assert!(desk.orders_for_table(5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_finalize_with_embedded_prices() {
    let mut desk = TableDesk::new(FakeApi::seeded()).with_join_key(JoinKey::Embedded);

    let receipt = desk.finalize_receipt(5).await.unwrap();
    assert_eq!(receipt.total, Decimal::from(1700));
    assert_eq!(receipt.lines[0].item_name, "Coke");
    // table-items was never needed
    assert_eq!(desk.api().fetches(), 0);
}

#[tokio::test]
async fn test_embedded_total_over_table_items_rows() {
    let mut desk = TableDesk::new(FakeApi::seeded()).with_join_key(JoinKey::Embedded);

    // table-items rows carry no price, so the catalog fills it in
    let orders = desk.orders_for_table(5).await.unwrap().to_vec();
    assert!(orders.iter().all(|order| order.price.is_none()));
    let items = desk.api().list_stock().await.unwrap();
    assert_eq!(
        compute_total(&orders, &items, JoinKey::Embedded),
        Decimal::from(1700)
    );
}

#[tokio::test]
async fn test_finalize_unknown_table() {
    let mut desk = TableDesk::new(FakeApi::seeded());
    assert!(matches!(
        desk.finalize_receipt(99).await,
        Err(ClientError::UnknownTable(99))
    ));
}

#[tokio::test]
async fn test_open_tab_requires_known_waiter() {
    let mut desk = TableDesk::new(FakeApi::seeded());

    let err = desk
        .open_tab(TabCreate {
            number: 8,
            waiter_id: 42,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(desk.refresh_tables().await.unwrap().len(), 2);

    desk.open_tab(TabCreate {
        number: 8,
        waiter_id: 1,
    })
    .await
    .unwrap();
    let tables = desk.refresh_tables().await.unwrap();
    assert_eq!(
        tables.iter().map(|t| t.number).collect::<Vec<_>>(),
        vec![3, 8, 12]
    );
}

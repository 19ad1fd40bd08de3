use std::sync::Arc;

use rust_decimal::Decimal;

use crate::notify::OrderFeed;
use crate::orders::coordinator::{CreateItemInput, OrderCoordinator};
use crate::orders::store::{MemoryOrderStore, OrderStore};
use shared::order::{ItemStatus, OrderDetail};

mod test_cascades;
mod test_inference;

// ========================================================================
// Shared fixtures
// ========================================================================

struct TestHarness {
    coordinator: Arc<OrderCoordinator>,
    store: Arc<MemoryOrderStore>,
    feed: OrderFeed,
    table_id: String,
}

fn harness() -> TestHarness {
    let store = Arc::new(MemoryOrderStore::new());
    let feed = OrderFeed::new();
    let coordinator = Arc::new(OrderCoordinator::new(store.clone(), feed.clone()));
    let table_id = store.seed_table("A5");
    TestHarness {
        coordinator,
        store,
        feed,
        table_id,
    }
}

fn item_input(order_id: &str, menu_item_id: &str, price: i64) -> CreateItemInput {
    CreateItemInput {
        order_id: order_id.to_string(),
        menu_item_id: menu_item_id.to_string(),
        quantity: 1,
        price_at_order: Decimal::from(price),
        notes: None,
        modifiers: vec![],
    }
}

impl TestHarness {
    /// Open an order and place `dishes` items on it, one menu item each.
    /// Returns the order id and the item ids in placement order.
    async fn open_with_items(&self, dishes: &[&str]) -> (String, Vec<String>) {
        let order = self
            .coordinator
            .open_order(&self.table_id, None)
            .await
            .unwrap();
        let mut item_ids = Vec::new();
        for dish in dishes {
            let menu_id = self.store.seed_menu_item(dish, Decimal::from(10));
            let detail = self
                .coordinator
                .create_item(item_input(&order.id, &menu_id, 10))
                .await
                .unwrap();
            let new_item = detail
                .items
                .iter()
                .find(|i| i.menu_item_id == menu_id)
                .expect("created item missing from aggregate");
            item_ids.push(new_item.id.clone());
        }
        (order.id, item_ids)
    }

    /// Drive an item to a status through the store (test setup shortcut)
    async fn force_item_status(&self, item_id: &str, status: ItemStatus) {
        let mut item = self.store.find_item(item_id).await.unwrap().unwrap();
        item.status = status;
        self.store.save_item(&item).await.unwrap();
    }

    async fn order_detail(&self, order_id: &str) -> OrderDetail {
        self.store
            .find_order_detail(order_id, true)
            .await
            .unwrap()
            .unwrap()
    }

    async fn item_status(&self, item_id: &str) -> ItemStatus {
        self.store.find_item(item_id).await.unwrap().unwrap().status
    }
}

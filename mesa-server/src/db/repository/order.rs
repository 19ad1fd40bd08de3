//! Order Repository
//!
//! Implements the [`OrderStore`] contract consumed by the coordinator, plus
//! the read-only queries behind the waiter console and kitchen display.
//!
//! `save_order` / `save_item` touch only the coordinator-owned fields
//! (`status`, `completed_at`, `payment_method`, `transaction_id`,
//! `total_amount` - item: `status`); everything else is immutable after
//! creation.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{DiningTable, MenuItem, ModifierOption, Order, OrderItem, OrderItemModifier};
use crate::orders::OrderStore;
use shared::order::{
    ItemStatus, MenuItemSummary, ModifierDetail, OrderDetail, OrderItemDetail, OrderStatus,
    TableSummary,
};

const ORDER_TABLE: &str = "order";
const ITEM_TABLE: &str = "order_item";
const MODIFIER_TABLE: &str = "order_item_modifier";

/// Kitchen display statistics
#[derive(Debug, Clone, Serialize)]
pub struct KitchenStats {
    /// Orders waiting for the kitchen (pending + confirmed)
    pub pending: i64,
    pub preparing: i64,
    pub ready: i64,
    /// Orders whose payment started today
    pub completed_today: i64,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn db(&self) -> &Surreal<Db> {
        self.base.db()
    }

    fn parse_id(id: &str, what: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid {} ID: {}", what, id)))
    }

    /// All orders, newest first (waiter console)
    pub async fn find_all(&self, limit: i64, offset: i64) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .db()
            .query("SELECT * FROM order ORDER BY ordered_at DESC LIMIT $limit START $offset")
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders visible on the kitchen display, oldest first
    pub async fn find_kitchen_orders(
        &self,
        statuses: &[OrderStatus],
    ) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .db()
            .query("SELECT * FROM order WHERE status IN $statuses ORDER BY ordered_at ASC")
            .bind(("statuses", statuses.to_vec()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Kitchen display statistics
    pub async fn kitchen_stats(&self, day_start: i64) -> RepoResult<KitchenStats> {
        let pending = self
            .count("SELECT count() AS count FROM order WHERE status IN ['pending', 'confirmed'] GROUP ALL")
            .await?;
        let preparing = self
            .count("SELECT count() AS count FROM order WHERE status = 'preparing' GROUP ALL")
            .await?;
        let ready = self
            .count("SELECT count() AS count FROM order WHERE status = 'ready' GROUP ALL")
            .await?;

        let mut result = self
            .db()
            .query("SELECT count() AS count FROM order WHERE completed_at != NONE AND completed_at >= $start GROUP ALL")
            .bind(("start", day_start))
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        let completed_today = rows.first().map(|r| r.count).unwrap_or(0);

        Ok(KitchenStats {
            pending,
            preparing,
            ready,
            completed_today,
        })
    }

    async fn count(&self, query: &str) -> RepoResult<i64> {
        let mut result = self.db().query(query).await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }

    /// Assemble the full aggregate for one order row
    async fn load_detail(
        &self,
        order: Order,
        include_modifiers: bool,
    ) -> RepoResult<OrderDetail> {
        let order_record = order
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Order row without ID".to_string()))?;
        let order_id = order_record.to_string();

        // Table summary
        let table: Option<DiningTable> = self.db().select(order.table_id.clone()).await?;
        let table_summary = table.map(|t| TableSummary {
            id: t.id.map(|id| id.to_string()).unwrap_or_default(),
            table_number: t.table_number,
            location: t.location,
        });

        // Items
        let items: Vec<OrderItem> = self
            .db()
            .query("SELECT * FROM order_item WHERE order_id = $order ORDER BY created_at ASC")
            .bind(("order", order_record))
            .await?
            .take(0)?;

        // Menu item summaries (one lookup per distinct menu item)
        let mut menu_summaries: HashMap<String, MenuItemSummary> = HashMap::new();
        for item in &items {
            let key = item.menu_item_id.to_string();
            if menu_summaries.contains_key(&key) {
                continue;
            }
            let menu: Option<MenuItem> = self.db().select(item.menu_item_id.clone()).await?;
            if let Some(m) = menu {
                menu_summaries.insert(
                    key,
                    MenuItemSummary {
                        id: m.id.map(|id| id.to_string()).unwrap_or_default(),
                        name: m.name,
                        prep_time_minutes: m.prep_time_minutes,
                    },
                );
            }
        }

        // Modifiers, grouped per item
        let mut modifiers_by_item: HashMap<String, Vec<ModifierDetail>> = HashMap::new();
        if include_modifiers && !items.is_empty() {
            let item_ids: Vec<RecordId> = items.iter().filter_map(|i| i.id.clone()).collect();
            let rows: Vec<OrderItemModifier> = self
                .db()
                .query("SELECT * FROM order_item_modifier WHERE item_id IN $items")
                .bind(("items", item_ids))
                .await?
                .take(0)?;

            // Option names from the catalog
            let mut option_names: HashMap<String, String> = HashMap::new();
            for row in &rows {
                let key = row.modifier_option_id.to_string();
                if option_names.contains_key(&key) {
                    continue;
                }
                let option: Option<ModifierOption> =
                    self.db().select(row.modifier_option_id.clone()).await?;
                if let Some(o) = option {
                    option_names.insert(key, o.name);
                }
            }

            for row in rows {
                let option_id = row.modifier_option_id.to_string();
                modifiers_by_item
                    .entry(row.item_id.to_string())
                    .or_default()
                    .push(ModifierDetail {
                        id: row.id.map(|id| id.to_string()).unwrap_or_default(),
                        name: option_names.get(&option_id).cloned(),
                        modifier_option_id: option_id,
                        price_adjustment: row.price_adjustment,
                    });
            }
        }

        let item_details = items
            .into_iter()
            .map(|item| {
                let item_id = item.id.map(|id| id.to_string()).unwrap_or_default();
                let menu_item_id = item.menu_item_id.to_string();
                OrderItemDetail {
                    modifiers: modifiers_by_item.remove(&item_id).unwrap_or_default(),
                    menu_item: menu_summaries.get(&menu_item_id).cloned(),
                    id: item_id,
                    order_id: item.order_id.to_string(),
                    menu_item_id,
                    quantity: item.quantity,
                    price_at_order: item.price_at_order,
                    notes: item.notes,
                    status: item.status,
                }
            })
            .collect();

        Ok(OrderDetail {
            id: order_id,
            table_id: order.table_id.to_string(),
            customer_id: order.customer_id.map(|id| id.to_string()),
            status: order.status,
            total_amount: order.total_amount,
            payment_method: order.payment_method,
            transaction_id: order.transaction_id,
            ordered_at: order.ordered_at,
            completed_at: order.completed_at,
            table: table_summary,
            items: item_details,
        })
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn find_order(&self, id: &str) -> RepoResult<Option<Order>> {
        let record_id = Self::parse_id(id, "order")?;
        let order: Option<Order> = self.db().select(record_id).await?;
        Ok(order)
    }

    async fn find_order_detail(
        &self,
        id: &str,
        include_modifiers: bool,
    ) -> RepoResult<Option<OrderDetail>> {
        let Some(order) = self.find_order(id).await? else {
            return Ok(None);
        };
        let detail = self.load_detail(order, include_modifiers).await?;
        Ok(Some(detail))
    }

    async fn save_order(&self, order: &Order) -> RepoResult<()> {
        let record_id = order
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Order has no ID".to_string()))?;
        self.db()
            .query(
                "UPDATE $thing SET status = $status, total_amount = $total, \
                 payment_method = $method, transaction_id = $transaction, \
                 completed_at = $completed",
            )
            .bind(("thing", record_id))
            .bind(("status", order.status))
            .bind(("total", order.total_amount))
            .bind(("method", order.payment_method))
            .bind(("transaction", order.transaction_id.clone()))
            .bind(("completed", order.completed_at))
            .await?;
        Ok(())
    }

    async fn find_item(&self, id: &str) -> RepoResult<Option<OrderItem>> {
        let record_id = Self::parse_id(id, "order item")?;
        let item: Option<OrderItem> = self.db().select(record_id).await?;
        Ok(item)
    }

    async fn find_items(&self, order_id: &str) -> RepoResult<Vec<OrderItem>> {
        let record_id = Self::parse_id(order_id, "order")?;
        let items: Vec<OrderItem> = self
            .db()
            .query("SELECT * FROM order_item WHERE order_id = $order ORDER BY created_at ASC")
            .bind(("order", record_id))
            .await?
            .take(0)?;
        Ok(items)
    }

    async fn save_item(&self, item: &OrderItem) -> RepoResult<()> {
        let record_id = item
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Order item has no ID".to_string()))?;
        self.db()
            .query("UPDATE $thing SET status = $status")
            .bind(("thing", record_id))
            .bind(("status", item.status))
            .await?;
        Ok(())
    }

    async fn bulk_update_items_status(
        &self,
        order_id: &str,
        from: &[ItemStatus],
        to: ItemStatus,
    ) -> RepoResult<usize> {
        let record_id = Self::parse_id(order_id, "order")?;
        let mut result = self
            .db()
            .query(
                "UPDATE order_item SET status = $to \
                 WHERE order_id = $order AND status IN $from",
            )
            .bind(("order", record_id))
            .bind(("from", from.to_vec()))
            .bind(("to", to))
            .await?;
        let updated: Vec<OrderItem> = result.take(0)?;
        Ok(updated.len())
    }

    async fn create_order(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    async fn create_item(&self, item: OrderItem) -> RepoResult<OrderItem> {
        let created: Option<OrderItem> = self.db().create(ITEM_TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order item".to_string()))
    }

    async fn create_item_modifiers(
        &self,
        modifiers: Vec<OrderItemModifier>,
    ) -> RepoResult<()> {
        for modifier in modifiers {
            let _: Option<OrderItemModifier> =
                self.db().create(MODIFIER_TABLE).content(modifier).await?;
        }
        Ok(())
    }

    async fn find_table(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let record_id = Self::parse_id(id, "dining table")?;
        let table: Option<DiningTable> = self.db().select(record_id).await?;
        Ok(table)
    }

    async fn find_active_order_by_table(&self, table_id: &str) -> RepoResult<Option<Order>> {
        let record_id = Self::parse_id(table_id, "dining table")?;
        // Newest first; resolved client-side to sidestep embedded LIMIT quirks
        let orders: Vec<Order> = self
            .db()
            .query(
                "SELECT * FROM order \
                 WHERE table_id = $table AND status NOT IN ['completed', 'cancelled'] \
                 ORDER BY ordered_at DESC",
            )
            .bind(("table", record_id))
            .await?
            .take(0)?;
        Ok(orders.into_iter().next())
    }

    async fn find_modifier_options(&self, ids: &[String]) -> RepoResult<Vec<ModifierOption>> {
        let mut options = Vec::with_capacity(ids.len());
        for id in ids {
            let record_id = Self::parse_id(id, "modifier option")?;
            let option: Option<ModifierOption> = self.db().select(record_id).await?;
            if let Some(o) = option {
                options.push(o);
            }
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use rust_decimal::Decimal;
    use shared::util::now_millis;

    async fn test_repo() -> OrderRepository {
        let service = DbService::memory().await.unwrap();
        OrderRepository::new(service.db)
    }

    async fn seed_table(repo: &OrderRepository) -> RecordId {
        let table = DiningTable {
            id: None,
            table_number: "A5".to_string(),
            location: Some("Terrace".to_string()),
            capacity: 4,
            is_active: true,
        };
        let created: Option<DiningTable> =
            repo.db().create("dining_table").content(table).await.unwrap();
        created.unwrap().id.unwrap()
    }

    async fn seed_menu_item(repo: &OrderRepository, name: &str, price: i64) -> RecordId {
        let menu = MenuItem {
            id: None,
            name: name.to_string(),
            price: Decimal::from(price),
            prep_time_minutes: 10,
            is_active: true,
        };
        let created: Option<MenuItem> =
            repo.db().create("menu_item").content(menu).await.unwrap();
        created.unwrap().id.unwrap()
    }

    fn new_item(order_id: RecordId, menu_id: RecordId, price: i64) -> OrderItem {
        OrderItem {
            id: None,
            order_id,
            menu_item_id: menu_id,
            quantity: 1,
            price_at_order: Decimal::from(price),
            notes: None,
            status: ItemStatus::Pending,
            created_at: now_millis(),
        }
    }

    #[tokio::test]
    async fn create_and_find_order() {
        let repo = test_repo().await;
        let table_id = seed_table(&repo).await;

        let order = repo
            .create_order(Order::open(table_id, None, now_millis()))
            .await
            .unwrap();
        let id = order.id.as_ref().unwrap().to_string();

        let found = repo.find_order(&id).await.unwrap().unwrap();
        assert_eq!(found.status, OrderStatus::Pending);
        assert_eq!(found.total_amount, Decimal::ZERO);
        assert!(found.completed_at.is_none());
    }

    #[tokio::test]
    async fn save_order_persists_coordinator_fields() {
        let repo = test_repo().await;
        let table_id = seed_table(&repo).await;
        let mut order = repo
            .create_order(Order::open(table_id, None, now_millis()))
            .await
            .unwrap();
        let id = order.id.as_ref().unwrap().to_string();

        order.status = OrderStatus::Payment;
        order.completed_at = Some(123_456);
        order.total_amount = Decimal::from(42);
        repo.save_order(&order).await.unwrap();

        let found = repo.find_order(&id).await.unwrap().unwrap();
        assert_eq!(found.status, OrderStatus::Payment);
        assert_eq!(found.completed_at, Some(123_456));
        assert_eq!(found.total_amount, Decimal::from(42));
    }

    #[tokio::test]
    async fn bulk_update_only_touches_matching_statuses() {
        let repo = test_repo().await;
        let table_id = seed_table(&repo).await;
        let menu_id = seed_menu_item(&repo, "Pho", 12).await;
        let order = repo
            .create_order(Order::open(table_id, None, now_millis()))
            .await
            .unwrap();
        let order_id = order.id.clone().unwrap();
        let order_key = order_id.to_string();

        let mut served = new_item(order_id.clone(), menu_id.clone(), 12);
        served.status = ItemStatus::Served;
        repo.create_item(served).await.unwrap();
        repo.create_item(new_item(order_id.clone(), menu_id.clone(), 12))
            .await
            .unwrap();
        repo.create_item(new_item(order_id, menu_id, 12)).await.unwrap();

        let updated = repo
            .bulk_update_items_status(
                &order_key,
                &[ItemStatus::Pending, ItemStatus::Confirmed],
                ItemStatus::Preparing,
            )
            .await
            .unwrap();
        assert_eq!(updated, 2);

        let items = repo.find_items(&order_key).await.unwrap();
        let preparing = items
            .iter()
            .filter(|i| i.status == ItemStatus::Preparing)
            .count();
        let served = items.iter().filter(|i| i.status == ItemStatus::Served).count();
        assert_eq!(preparing, 2);
        assert_eq!(served, 1);
    }

    #[tokio::test]
    async fn detail_includes_table_items_and_modifiers() {
        let repo = test_repo().await;
        let table_id = seed_table(&repo).await;
        let menu_id = seed_menu_item(&repo, "Bun Cha", 9).await;
        let order = repo
            .create_order(Order::open(table_id, None, now_millis()))
            .await
            .unwrap();
        let order_key = order.id.clone().unwrap().to_string();

        let option = ModifierOption {
            id: None,
            name: "Extra herbs".to_string(),
            price_adjustment: Decimal::ONE,
        };
        let option: Option<ModifierOption> = repo
            .db()
            .create("modifier_option")
            .content(option)
            .await
            .unwrap();
        let option_id = option.unwrap().id.unwrap();

        let item = repo
            .create_item(new_item(order.id.clone().unwrap(), menu_id, 9))
            .await
            .unwrap();
        repo.create_item_modifiers(vec![OrderItemModifier {
            id: None,
            item_id: item.id.clone().unwrap(),
            modifier_option_id: option_id,
            price_adjustment: Decimal::ONE,
        }])
        .await
        .unwrap();

        let detail = repo
            .find_order_detail(&order_key, true)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.table.as_ref().unwrap().table_number, "A5");
        assert_eq!(detail.items[0].menu_item.as_ref().unwrap().name, "Bun Cha");
        assert_eq!(detail.items[0].modifiers.len(), 1);
        assert_eq!(
            detail.items[0].modifiers[0].name.as_deref(),
            Some("Extra herbs")
        );
        assert_eq!(detail.items[0].line_total(), Decimal::from(10));
    }

    #[tokio::test]
    async fn active_order_lookup_skips_terminal_orders() {
        let repo = test_repo().await;
        let table_id = seed_table(&repo).await;
        let table_key = table_id.to_string();

        let mut done = repo
            .create_order(Order::open(table_id.clone(), None, 1_000))
            .await
            .unwrap();
        done.status = OrderStatus::Completed;
        done.completed_at = Some(2_000);
        repo.save_order(&done).await.unwrap();

        assert!(repo
            .find_active_order_by_table(&table_key)
            .await
            .unwrap()
            .is_none());

        let open = repo
            .create_order(Order::open(table_id, None, 3_000))
            .await
            .unwrap();
        let active = repo
            .find_active_order_by_table(&table_key)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.id, open.id);
    }
}

//! Order coordinator
//!
//! Orchestrates one transition request end-to-end: validates preconditions,
//! applies the transition-engine decision against the store, reloads the
//! resulting aggregate, and hands it to the order feed. The feed is an
//! injected capability, not ambient state.
//!
//! All mutating operations serialize on the order id for the whole
//! read-modify-write-reload sequence. No operation is retried; each request
//! either returns the reloaded aggregate or a single error.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use surrealdb::RecordId;

use super::engine;
use super::error::{OrderActionError, OrderActionResult};
use super::locks::OrderLocks;
use super::store::OrderStore;
use crate::db::models::{Order, OrderItem, OrderItemModifier};
use crate::db::repository::RepoError;
use crate::notify::OrderFeed;
use shared::feed::OrderChannel;
use shared::order::{ItemStatus, OrderDetail, OrderStatus, PaymentMethod};
use shared::util::now_millis;

/// Payload for placing a new item on an order
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemInput {
    pub order_id: String,
    pub menu_item_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub price_at_order: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
    /// Catalog modifier option ids
    #[serde(default)]
    pub modifiers: Vec<String>,
}

fn default_quantity() -> i32 {
    1
}

/// Order coordinator - the externally callable transition surface
pub struct OrderCoordinator {
    store: Arc<dyn OrderStore>,
    feed: OrderFeed,
    locks: OrderLocks,
}

impl std::fmt::Debug for OrderCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderCoordinator")
            .field("store", &"<OrderStore>")
            .field("feed", &self.feed)
            .finish()
    }
}

impl OrderCoordinator {
    pub fn new(store: Arc<dyn OrderStore>, feed: OrderFeed) -> Self {
        Self {
            store,
            feed,
            locks: OrderLocks::new(),
        }
    }

    /// Open an order for a table, creating it if none is active
    ///
    /// Idempotent per table: while a non-terminal order exists for the
    /// table, that order is returned instead of creating a second one.
    pub async fn open_order(
        &self,
        table_id: &str,
        customer_id: Option<String>,
    ) -> OrderActionResult<OrderDetail> {
        let table_record: RecordId = table_id
            .parse()
            .map_err(|_| OrderActionError::TableNotFound(table_id.to_string()))?;
        let customer_record = parse_optional_id(customer_id.as_deref(), "customer")?;

        // Serialize on the table so two guests cannot open twice
        let _guard = self.locks.acquire(table_id).await;

        self.store
            .find_table(table_id)
            .await?
            .ok_or_else(|| OrderActionError::TableNotFound(table_id.to_string()))?;

        if let Some(existing) = self.store.find_active_order_by_table(table_id).await? {
            let id = order_key(&existing)?;
            return self.reload_detail(&id).await;
        }

        let order = self
            .store
            .create_order(Order::open(table_record, customer_record, now_millis()))
            .await?;
        let id = order_key(&order)?;
        tracing::info!(order_id = %id, table_id = %table_id, "Order opened");

        let detail = self.reload_detail(&id).await?;
        self.feed.broadcast_order(&detail);
        Ok(detail)
    }

    /// Place a new item on an order
    ///
    /// Fails on locked orders (payment / completed / cancelled). An order
    /// already marked ready or served is demoted to `pending`: a new item
    /// always reopens kitchen work.
    pub async fn create_item(&self, input: CreateItemInput) -> OrderActionResult<OrderDetail> {
        if input.quantity < 1 {
            return Err(OrderActionError::InvalidQuantity(input.quantity));
        }
        let menu_record: RecordId = input.menu_item_id.parse().map_err(|_| {
            OrderActionError::Store(RepoError::Validation(format!(
                "Invalid menu item ID: {}",
                input.menu_item_id
            )))
        })?;

        let _guard = self.locks.acquire(&input.order_id).await;

        let mut order = self.find_order(&input.order_id).await?;
        if order.status.is_locked() {
            return Err(OrderActionError::OrderLocked {
                id: input.order_id.clone(),
                status: order.status,
            });
        }

        // Resolve modifier options up front; snapshots are taken from the
        // catalog, not from the client
        let options = self.store.find_modifier_options(&input.modifiers).await?;
        if options.len() != input.modifiers.len() {
            let found: Vec<String> = options
                .iter()
                .filter_map(|o| o.id.as_ref().map(|id| id.to_string()))
                .collect();
            let missing = input
                .modifiers
                .iter()
                .find(|id| !found.contains(*id))
                .cloned()
                .unwrap_or_default();
            return Err(OrderActionError::ModifierOptionNotFound(missing));
        }

        let item = self
            .store
            .create_item(OrderItem {
                id: None,
                order_id: order_record(&order)?,
                menu_item_id: menu_record,
                quantity: input.quantity,
                price_at_order: input.price_at_order,
                notes: input.notes.clone(),
                status: ItemStatus::Pending,
                created_at: now_millis(),
            })
            .await?;

        if !options.is_empty() {
            let item_record = item.id.clone().ok_or_else(|| {
                OrderActionError::Store(RepoError::Database("Item row without ID".to_string()))
            })?;
            let rows = options
                .iter()
                .filter_map(|o| {
                    o.id.clone().map(|option_id| OrderItemModifier {
                        id: None,
                        item_id: item_record.clone(),
                        modifier_option_id: option_id,
                        price_adjustment: o.price_adjustment,
                    })
                })
                .collect();
            self.store.create_item_modifiers(rows).await?;
        }

        if engine::reopens_kitchen(order.status) {
            order.status = OrderStatus::Pending;
            self.store.save_order(&order).await?;
            tracing::info!(order_id = %input.order_id, "New item reopened kitchen work");
        }

        let detail = self.reload_detail(&input.order_id).await?;
        // Attention cue first, then the generic pair
        self.feed.emit(OrderChannel::NewOrderCreated, &detail);
        self.feed.broadcast_order(&detail);
        Ok(detail)
    }

    /// Advance the order status (kitchen display / waiter console)
    ///
    /// Applies the downward cascade so no item is left behind the new
    /// envelope, then broadcasts the reloaded aggregate.
    pub async fn advance_order(
        &self,
        order_id: &str,
        target_status: &str,
    ) -> OrderActionResult<OrderDetail> {
        let target: OrderStatus = target_status
            .parse()
            .map_err(|_| OrderActionError::InvalidStatus(target_status.to_string()))?;

        let _guard = self.locks.acquire(order_id).await;

        let mut order = self.find_order(order_id).await?;
        order.status = target;
        if engine::stamps_completion(target) {
            order.completed_at = Some(now_millis());
        }
        self.store.save_order(&order).await?;

        if let Some(cascade) = engine::item_cascade(target) {
            let updated = self
                .store
                .bulk_update_items_status(order_id, cascade.from, cascade.to)
                .await?;
            tracing::debug!(order_id = %order_id, updated, to = %cascade.to, "Cascaded item statuses");
        }

        tracing::info!(order_id = %order_id, status = %target, "Order status updated");

        let detail = self.reload_detail(order_id).await?;
        self.feed.broadcast_order(&detail);
        if target == OrderStatus::Confirmed {
            self.feed.emit(OrderChannel::OrderConfirmed, &detail);
        }
        Ok(detail)
    }

    /// Advance a single item status (kitchen display)
    ///
    /// Recomputes the parent order status by upward inference: when every
    /// active item is fulfilled the order is promoted to `ready`; a ready
    /// order with reopened work is demoted back to `preparing`.
    pub async fn advance_item(
        &self,
        item_id: &str,
        target_status: &str,
    ) -> OrderActionResult<OrderDetail> {
        let target: ItemStatus = target_status
            .parse()
            .map_err(|_| OrderActionError::InvalidStatus(target_status.to_string()))?;

        // First read resolves the owning order for the lock key
        let item = self
            .store
            .find_item(item_id)
            .await?
            .ok_or_else(|| OrderActionError::ItemNotFound(item_id.to_string()))?;
        let order_id = item.order_id.to_string();

        let _guard = self.locks.acquire(&order_id).await;

        let mut item = self
            .store
            .find_item(item_id)
            .await?
            .ok_or_else(|| OrderActionError::ItemNotFound(item_id.to_string()))?;
        item.status = target;
        self.store.save_item(&item).await?;

        let mut order = self.find_order(&order_id).await?;
        let statuses: Vec<ItemStatus> = self
            .store
            .find_items(&order_id)
            .await?
            .iter()
            .map(|i| i.status)
            .collect();
        if let Some(next) = engine::infer_parent_status(order.status, &statuses) {
            tracing::info!(order_id = %order_id, from = %order.status, to = %next, "Order status inferred from items");
            order.status = next;
            self.store.save_order(&order).await?;
        }

        let detail = self.reload_detail(&order_id).await?;
        self.feed.broadcast_order(&detail);
        Ok(detail)
    }

    /// Request payment for an order (customer device)
    ///
    /// Gated on a global invariant: at least one active item exists and all
    /// of them have been served.
    pub async fn request_payment(
        &self,
        order_id: &str,
        payment_method: &str,
    ) -> OrderActionResult<OrderDetail> {
        let method: PaymentMethod = payment_method
            .parse()
            .map_err(|_| OrderActionError::InvalidPaymentMethod(payment_method.to_string()))?;

        let _guard = self.locks.acquire(order_id).await;

        let mut order = self.find_order(order_id).await?;
        match order.status {
            OrderStatus::Payment => return Err(OrderActionError::AlreadyInPayment),
            OrderStatus::Completed => return Err(OrderActionError::AlreadyCompleted),
            OrderStatus::Cancelled => return Err(OrderActionError::OrderCancelled),
            _ => {}
        }

        let items = self.store.find_items(order_id).await?;
        let active: Vec<&OrderItem> = items.iter().filter(|i| i.status.is_active()).collect();
        if active.is_empty() {
            return Err(OrderActionError::EmptyOrder);
        }
        let unserved = active
            .iter()
            .filter(|i| i.status != ItemStatus::Served)
            .count();
        if unserved > 0 {
            return Err(OrderActionError::ItemsNotServed { unserved });
        }

        order.status = OrderStatus::Payment;
        order.payment_method = Some(method);
        order.completed_at = Some(now_millis());
        self.store.save_order(&order).await?;
        tracing::info!(order_id = %order_id, method = %method, "Payment requested");

        let detail = self.reload_detail(order_id).await?;
        self.feed.broadcast_order(&detail);
        Ok(detail)
    }

    /// Complete payment after the gateway callback
    pub async fn complete_payment(
        &self,
        order_id: &str,
        transaction_id: &str,
        payment_method: Option<&str>,
    ) -> OrderActionResult<OrderDetail> {
        let method = match payment_method {
            Some(raw) => Some(raw.parse::<PaymentMethod>().map_err(|_| {
                OrderActionError::InvalidPaymentMethod(raw.to_string())
            })?),
            None => None,
        };

        let _guard = self.locks.acquire(order_id).await;

        let mut order = self.find_order(order_id).await?;
        if order.status != OrderStatus::Payment {
            return Err(OrderActionError::NotAwaitingPayment);
        }

        order.status = OrderStatus::Completed;
        order.transaction_id = Some(transaction_id.to_string());
        if let Some(m) = method {
            order.payment_method = Some(m);
        }
        order.completed_at = Some(now_millis());
        self.store.save_order(&order).await?;
        tracing::info!(order_id = %order_id, transaction_id = %transaction_id, "Payment completed");

        let detail = self.reload_detail(order_id).await?;
        self.feed.broadcast_order(&detail);
        Ok(detail)
    }

    // ── Internals ───────────────────────────────────────────────────

    async fn find_order(&self, order_id: &str) -> OrderActionResult<Order> {
        self.store
            .find_order(order_id)
            .await?
            .ok_or_else(|| OrderActionError::OrderNotFound(order_id.to_string()))
    }

    /// Reload the aggregate and refresh the persisted bill total
    ///
    /// The total always equals the sum of active line totals, so cancelling
    /// items (directly or by cascade) is reflected immediately.
    async fn reload_detail(&self, order_id: &str) -> OrderActionResult<OrderDetail> {
        let mut detail = self
            .store
            .find_order_detail(order_id, true)
            .await?
            .ok_or_else(|| OrderActionError::OrderNotFound(order_id.to_string()))?;

        let total = detail.active_total();
        if total != detail.total_amount {
            if let Some(mut order) = self.store.find_order(order_id).await? {
                order.total_amount = total;
                self.store.save_order(&order).await?;
            }
            detail.total_amount = total;
        }
        Ok(detail)
    }
}

fn order_key(order: &Order) -> OrderActionResult<String> {
    Ok(order_record(order)?.to_string())
}

fn order_record(order: &Order) -> OrderActionResult<RecordId> {
    order.id.clone().ok_or_else(|| {
        OrderActionError::Store(RepoError::Database("Order row without ID".to_string()))
    })
}

fn parse_optional_id(id: Option<&str>, what: &str) -> OrderActionResult<Option<RecordId>> {
    match id {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| {
                OrderActionError::Store(RepoError::Validation(format!(
                    "Invalid {} ID: {}",
                    what, raw
                )))
            }),
        None => Ok(None),
    }
}

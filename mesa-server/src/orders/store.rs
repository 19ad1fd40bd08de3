//! Order store contract
//!
//! The persistence interface the coordinator consumes. The production
//! implementation is [`crate::db::repository::OrderRepository`] on embedded
//! SurrealDB; tests run against [`MemoryOrderStore`].
//!
//! Writes must be visible to subsequent reads within the same unit of work:
//! the coordinator re-reads cascaded item statuses right after writing them.

use async_trait::async_trait;

use crate::db::models::{DiningTable, ModifierOption, Order, OrderItem, OrderItemModifier};
use crate::db::repository::RepoResult;
use shared::order::{ItemStatus, OrderDetail};

/// Persistence contract for orders and their items
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find_order(&self, id: &str) -> RepoResult<Option<Order>>;

    /// Full aggregate: order + table summary + items (+ modifiers on demand)
    async fn find_order_detail(
        &self,
        id: &str,
        include_modifiers: bool,
    ) -> RepoResult<Option<OrderDetail>>;

    /// Persist the coordinator-owned order fields
    async fn save_order(&self, order: &Order) -> RepoResult<()>;

    async fn find_item(&self, id: &str) -> RepoResult<Option<OrderItem>>;

    async fn find_items(&self, order_id: &str) -> RepoResult<Vec<OrderItem>>;

    /// Persist the item status
    async fn save_item(&self, item: &OrderItem) -> RepoResult<()>;

    /// Move every item of the order currently in one of `from` to `to`;
    /// returns the number of items updated
    async fn bulk_update_items_status(
        &self,
        order_id: &str,
        from: &[ItemStatus],
        to: ItemStatus,
    ) -> RepoResult<usize>;

    async fn create_order(&self, order: Order) -> RepoResult<Order>;

    async fn create_item(&self, item: OrderItem) -> RepoResult<OrderItem>;

    async fn create_item_modifiers(&self, modifiers: Vec<OrderItemModifier>) -> RepoResult<()>;

    async fn find_table(&self, id: &str) -> RepoResult<Option<DiningTable>>;

    /// The table's newest non-terminal order, if any
    async fn find_active_order_by_table(&self, table_id: &str) -> RepoResult<Option<Order>>;

    /// Catalog lookup for modifier options; unknown ids are skipped
    async fn find_modifier_options(&self, ids: &[String]) -> RepoResult<Vec<ModifierOption>>;
}

#[cfg(test)]
pub use memory::MemoryOrderStore;

//! Order and order item models
//!
//! `status`, `completed_at`, `payment_method` and `transaction_id` are
//! written exclusively by the order coordinator; no other code path may
//! mutate them. Modifier rows are immutable once created.

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::order::{ItemStatus, OrderStatus, PaymentMethod};
use surrealdb::RecordId;

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Owning dining table
    #[serde(with = "serde_helpers::record_id")]
    pub table_id: RecordId,
    /// Optional customer account reference
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub customer_id: Option<RecordId>,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    /// Unix millis
    pub ordered_at: i64,
    /// Unix millis; set iff status is `payment` or `completed`
    #[serde(default)]
    pub completed_at: Option<i64>,
}

impl Order {
    /// New pending order for a table, with no items yet
    pub fn open(table_id: RecordId, customer_id: Option<RecordId>, now: i64) -> Self {
        Self {
            id: None,
            table_id,
            customer_id,
            status: OrderStatus::Pending,
            total_amount: Decimal::ZERO,
            payment_method: None,
            transaction_id: None,
            ordered_at: now,
            completed_at: None,
        }
    }
}

/// Order item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Owning order
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item_id: RecordId,
    pub quantity: i32,
    /// Price snapshot taken at creation; immutable
    pub price_at_order: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: ItemStatus,
    /// Unix millis
    pub created_at: i64,
}

/// Modifier applied to an order item
///
/// References a catalog option and snapshots its price adjustment. Never
/// transitioned independently; its lifecycle follows the parent item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemModifier {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Owning order item
    #[serde(with = "serde_helpers::record_id")]
    pub item_id: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub modifier_option_id: RecordId,
    /// Price adjustment snapshot taken at creation
    pub price_adjustment: Decimal,
}

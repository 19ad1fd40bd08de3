//! Order aggregate - the shape broadcast to clients
//!
//! After every successful mutation the server reloads the full aggregate
//! (order + table summary + items with menu-item summaries and modifiers)
//! and pushes it to all observers. The same shape is returned by the HTTP
//! handlers, so a client never sees two versions of an order.
//!
//! All IDs are `table:key` strings.

use super::{ItemStatus, OrderStatus, PaymentMethod};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Full order aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: String,
    pub table_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Unix millis
    pub ordered_at: i64,
    /// Unix millis; set iff status is `payment` or `completed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableSummary>,
    pub items: Vec<OrderItemDetail>,
}

impl OrderDetail {
    /// Items that count toward aggregate status and the bill
    pub fn active_items(&self) -> impl Iterator<Item = &OrderItemDetail> {
        self.items.iter().filter(|i| i.status.is_active())
    }

    /// Sum of line totals over active items
    pub fn active_total(&self) -> Decimal {
        self.active_items().map(|i| i.line_total()).sum()
    }
}

/// Dining table summary carried in the aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSummary {
    pub id: String,
    pub table_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// One line of the order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDetail {
    pub id: String,
    pub order_id: String,
    pub menu_item_id: String,
    pub quantity: i32,
    /// Price snapshot taken when the item was placed
    pub price_at_order: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_item: Option<MenuItemSummary>,
    #[serde(default)]
    pub modifiers: Vec<ModifierDetail>,
}

impl OrderItemDetail {
    /// (unit price + modifier adjustments) × quantity
    pub fn line_total(&self) -> Decimal {
        let adjustments: Decimal = self.modifiers.iter().map(|m| m.price_adjustment).sum();
        (self.price_at_order + adjustments) * Decimal::from(self.quantity)
    }
}

/// Menu item summary carried per line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemSummary {
    pub id: String,
    pub name: String,
    pub prep_time_minutes: i32,
}

/// Modifier applied to a line, with its price snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierDetail {
    pub id: String,
    pub modifier_option_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub price_adjustment: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(status: ItemStatus, price: i64, qty: i32, adjustments: &[i64]) -> OrderItemDetail {
        OrderItemDetail {
            id: "order_item:x".into(),
            order_id: "order:x".into(),
            menu_item_id: "menu_item:x".into(),
            quantity: qty,
            price_at_order: Decimal::from(price),
            notes: None,
            status,
            menu_item: None,
            modifiers: adjustments
                .iter()
                .map(|a| ModifierDetail {
                    id: "order_item_modifier:x".into(),
                    modifier_option_id: "modifier_option:x".into(),
                    name: None,
                    price_adjustment: Decimal::from(*a),
                })
                .collect(),
        }
    }

    #[test]
    fn active_total_skips_cancelled_lines() {
        let detail = OrderDetail {
            id: "order:1".into(),
            table_id: "dining_table:1".into(),
            customer_id: None,
            status: OrderStatus::Preparing,
            total_amount: Decimal::ZERO,
            payment_method: None,
            transaction_id: None,
            ordered_at: 0,
            completed_at: None,
            table: None,
            items: vec![
                item(ItemStatus::Preparing, 10, 2, &[1]),
                item(ItemStatus::Cancelled, 99, 1, &[]),
            ],
        };
        // (10 + 1) * 2, cancelled line excluded
        assert_eq!(detail.active_total(), Decimal::from(22));
    }
}

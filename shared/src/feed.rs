//! Order feed channels and events
//!
//! Every committed mutation is fanned out on named channels. Kitchen and
//! waiter displays subscribe to the global channels; a customer device
//! subscribes to its table channel only.

use crate::order::OrderDetail;
use serde::Serialize;

/// Named broadcast channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderChannel {
    /// Global: an order's aggregate changed
    OrderStatusUpdated,
    /// Global: a new item was placed (attention cue for kitchen UIs)
    NewOrderCreated,
    /// Global: a waiter confirmed an order (kitchen cue)
    OrderConfirmed,
    /// Per-table: keyed by the owning table's id
    OrderUpdateTable(String),
}

impl OrderChannel {
    /// Wire name of the channel
    pub fn name(&self) -> String {
        match self {
            OrderChannel::OrderStatusUpdated => "order_status_updated".to_string(),
            OrderChannel::NewOrderCreated => "new_order_created".to_string(),
            OrderChannel::OrderConfirmed => "order_confirmed".to_string(),
            OrderChannel::OrderUpdateTable(table_id) => {
                format!("order_update_table_{}", table_id)
            }
        }
    }

    /// Global channels are observed by every kitchen/waiter display
    pub fn is_global(&self) -> bool {
        !matches!(self, OrderChannel::OrderUpdateTable(_))
    }

    /// Table id for per-table channels
    pub fn table_id(&self) -> Option<&str> {
        match self {
            OrderChannel::OrderUpdateTable(table_id) => Some(table_id),
            _ => None,
        }
    }
}

/// One event on the feed: a channel plus the fully reloaded aggregate
#[derive(Debug, Clone)]
pub struct OrderFeedEvent {
    pub channel: OrderChannel,
    pub order: OrderDetail,
}

/// Wire frame pushed to feed subscribers
#[derive(Debug, Serialize)]
pub struct FeedFrame<'a> {
    pub event: String,
    pub data: &'a OrderDetail,
}

impl OrderFeedEvent {
    pub fn frame(&self) -> FeedFrame<'_> {
        FeedFrame {
            event: self.channel.name(),
            data: &self.order,
        }
    }
}

//! Order feed - real-time fan-out
//!
//! # 架构
//!
//! ```text
//! OrderCoordinator ──▶ emit() ──▶ broadcast::Sender<OrderFeedEvent>
//!                                        │
//!                      ┌─────────────────┼─────────────────┐
//!                      ▼                 ▼                 ▼
//!                kitchen display    waiter console   customer device
//!                (global channels)  (global channels) (table channel)
//! ```
//!
//! Delivery is best-effort and fire-and-forget: the feed broadcasts
//! already-committed facts, so a delivery failure never rolls back state.
//! A send with no subscribers is not an error.

use tokio::sync::broadcast;

use shared::feed::{OrderChannel, OrderFeedEvent};
use shared::order::OrderDetail;

/// Default broadcast channel capacity
pub const FEED_CHANNEL_CAPACITY: usize = 1024;

/// Broadcast handle for order events
#[derive(Debug, Clone)]
pub struct OrderFeed {
    tx: broadcast::Sender<OrderFeedEvent>,
}

impl OrderFeed {
    pub fn new() -> Self {
        Self::with_capacity(FEED_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish one event on a named channel (fire-and-forget)
    pub fn emit(&self, channel: OrderChannel, order: &OrderDetail) {
        let event = OrderFeedEvent {
            channel,
            order: order.clone(),
        };
        if self.tx.send(event).is_err() {
            tracing::debug!("Order feed: no active subscribers");
        }
    }

    /// The generic post-mutation pair: global status event, then the
    /// per-table event for the customer device seated at that table
    pub fn broadcast_order(&self, order: &OrderDetail) {
        self.emit(OrderChannel::OrderStatusUpdated, order);
        self.emit(
            OrderChannel::OrderUpdateTable(order.table_id.clone()),
            order,
        );
    }

    /// Subscribe to all feed events
    pub fn subscribe(&self) -> broadcast::Receiver<OrderFeedEvent> {
        self.tx.subscribe()
    }
}

impl Default for OrderFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::order::OrderStatus;

    fn sample_order() -> OrderDetail {
        OrderDetail {
            id: "order:1".into(),
            table_id: "dining_table:1".into(),
            customer_id: None,
            status: OrderStatus::Pending,
            total_amount: Decimal::ZERO,
            payment_method: None,
            transaction_id: None,
            ordered_at: 0,
            completed_at: None,
            table: None,
            items: vec![],
        }
    }

    #[tokio::test]
    async fn broadcast_emits_global_then_table_event() {
        let feed = OrderFeed::new();
        let mut rx = feed.subscribe();

        feed.broadcast_order(&sample_order());

        let first = rx.recv().await.unwrap();
        assert_eq!(first.channel, OrderChannel::OrderStatusUpdated);
        let second = rx.recv().await.unwrap();
        assert_eq!(
            second.channel,
            OrderChannel::OrderUpdateTable("dining_table:1".into())
        );
    }

    #[tokio::test]
    async fn emit_without_subscribers_is_not_an_error() {
        let feed = OrderFeed::new();
        feed.emit(OrderChannel::NewOrderCreated, &sample_order());
    }
}

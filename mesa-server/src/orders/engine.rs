//! Transition engine
//!
//! Pure decision logic for the order/item dual state machine. The order
//! status is the outer envelope, item statuses are the inner contents; two
//! rule families keep them consistent:
//!
//! - **Downward cascade**: an explicit order-level transition drags items
//!   forward so none is left behind the new envelope.
//! - **Upward inference**: an item-level change recomputes the parent order
//!   status from the aggregate of its active items.
//!
//! Every legal transition and its cascade is defined here and nowhere else.

use shared::order::{ItemStatus, OrderStatus};

/// Items in one of `from` move to `to` when the order transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemCascade {
    pub from: &'static [ItemStatus],
    pub to: ItemStatus,
}

/// Downward cascade applied to items when the order reaches `target`
///
/// Transitions to `payment` / `completed` never touch items: the item
/// vocabulary has no money-collection states.
pub fn item_cascade(target: OrderStatus) -> Option<ItemCascade> {
    match target {
        OrderStatus::Confirmed => Some(ItemCascade {
            from: &[ItemStatus::Pending],
            to: ItemStatus::Confirmed,
        }),
        OrderStatus::Preparing => Some(ItemCascade {
            from: &[ItemStatus::Pending, ItemStatus::Confirmed],
            to: ItemStatus::Preparing,
        }),
        OrderStatus::Ready => Some(ItemCascade {
            from: &[ItemStatus::Preparing],
            to: ItemStatus::Ready,
        }),
        OrderStatus::Served => Some(ItemCascade {
            from: &[ItemStatus::Ready, ItemStatus::Preparing],
            to: ItemStatus::Served,
        }),
        OrderStatus::Cancelled => Some(ItemCascade {
            from: &ItemStatus::ALL,
            to: ItemStatus::Cancelled,
        }),
        OrderStatus::Pending | OrderStatus::Payment | OrderStatus::Completed => None,
    }
}

/// Upward inference: recompute the parent order status after an item change
///
/// Returns the status the order should move to, or `None` when no change is
/// warranted (the inference is idempotent). Only active (non-cancelled)
/// items are considered; an order with zero active items is never promoted.
/// Orders in `served` or beyond are locked with respect to inference.
pub fn infer_parent_status(current: OrderStatus, items: &[ItemStatus]) -> Option<OrderStatus> {
    if matches!(
        current,
        OrderStatus::Served | OrderStatus::Payment | OrderStatus::Completed | OrderStatus::Cancelled
    ) {
        return None;
    }

    let active: Vec<ItemStatus> = items.iter().copied().filter(|s| s.is_active()).collect();
    let all_fulfilled = !active.is_empty() && active.iter().all(|s| s.is_fulfilled());

    if all_fulfilled && current != OrderStatus::Ready {
        // Every dish is ready or already on the table
        Some(OrderStatus::Ready)
    } else if !all_fulfilled && current == OrderStatus::Ready {
        // A dish reopened kitchen work while the order was marked ready
        Some(OrderStatus::Preparing)
    } else {
        None
    }
}

/// Creating a new item on an order in these states reopens kitchen work,
/// demoting the order to `pending`
pub fn reopens_kitchen(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Ready | OrderStatus::Served)
}

/// Transitions into these states stamp `completed_at`; the stamp is never
/// cleared afterwards
pub fn stamps_completion(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Payment | OrderStatus::Completed)
}

//! Order and item status vocabularies
//!
//! Two distinct closed enums: the order status is the outer envelope of the
//! lifecycle, the item status tracks kitchen/service work only. Items never
//! carry the money-collection states (`payment`, `completed`).
//!
//! Wire strings are lowercase and case-sensitive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order lifecycle status
///
/// Ordered chain with one side branch:
/// `pending → confirmed → preparing → ready → served → payment → completed`,
/// `cancelled` reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Served,
    Payment,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// All legal values, in chain order
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Payment,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Payment => "payment",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal states: the order will never transition again on its own
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Locked states: no new items may be created on the order
    pub fn is_locked(&self) -> bool {
        matches!(
            self,
            OrderStatus::Payment | OrderStatus::Completed | OrderStatus::Cancelled
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "served" => Ok(OrderStatus::Served),
            "payment" => Ok(OrderStatus::Payment),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {}", other)),
        }
    }
}

/// Order item status
///
/// Narrower chain than [`OrderStatus`]: items represent kitchen/service work
/// and stop at `served`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

impl ItemStatus {
    /// All legal values, in chain order
    pub const ALL: [ItemStatus; 6] = [
        ItemStatus::Pending,
        ItemStatus::Confirmed,
        ItemStatus::Preparing,
        ItemStatus::Ready,
        ItemStatus::Served,
        ItemStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Confirmed => "confirmed",
            ItemStatus::Preparing => "preparing",
            ItemStatus::Ready => "ready",
            ItemStatus::Served => "served",
            ItemStatus::Cancelled => "cancelled",
        }
    }

    /// Active items count toward aggregate status and the bill
    pub fn is_active(&self) -> bool {
        !matches!(self, ItemStatus::Cancelled)
    }

    /// Kitchen work on the item is done (ready or already served)
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, ItemStatus::Ready | ItemStatus::Served)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ItemStatus::Pending),
            "confirmed" => Ok(ItemStatus::Confirmed),
            "preparing" => Ok(ItemStatus::Preparing),
            "ready" => Ok(ItemStatus::Ready),
            "served" => Ok(ItemStatus::Served),
            "cancelled" => Ok(ItemStatus::Cancelled),
            other => Err(format!("unknown item status: {}", other)),
        }
    }
}

//! Coordinator errors
//!
//! Every failure carries a stable snake_case reason code; preconditions are
//! checked before any write, so a failed operation never leaves partial
//! state. Store failures propagate unchanged and surface as a generic
//! infrastructure error.

use crate::db::repository::RepoError;
use crate::utils::AppError;
use shared::order::OrderStatus;
use thiserror::Error;

/// Order coordinator errors
#[derive(Debug, Error)]
pub enum OrderActionError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order item not found: {0}")]
    ItemNotFound(String),

    #[error("Dining table not found: {0}")]
    TableNotFound(String),

    #[error("Modifier option not found: {0}")]
    ModifierOptionNotFound(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid payment method: {0}")]
    InvalidPaymentMethod(String),

    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i32),

    #[error("Order {id} is locked ({status}), no new items may be added")]
    OrderLocked { id: String, status: OrderStatus },

    #[error("Order has already requested payment")]
    AlreadyInPayment,

    #[error("Order is already completed")]
    AlreadyCompleted,

    #[error("Order has been cancelled")]
    OrderCancelled,

    #[error("Order has no active items")]
    EmptyOrder,

    #[error("{unserved} item(s) have not been served yet")]
    ItemsNotServed { unserved: usize },

    #[error("Order is not awaiting payment")]
    NotAwaitingPayment,

    #[error(transparent)]
    Store(#[from] RepoError),
}

impl OrderActionError {
    /// Stable reason code surfaced to callers
    pub fn reason_code(&self) -> &'static str {
        match self {
            OrderActionError::OrderNotFound(_) => "order_not_found",
            OrderActionError::ItemNotFound(_) => "item_not_found",
            OrderActionError::TableNotFound(_) => "table_not_found",
            OrderActionError::ModifierOptionNotFound(_) => "modifier_option_not_found",
            OrderActionError::InvalidStatus(_) => "invalid_status",
            OrderActionError::InvalidPaymentMethod(_) => "invalid_payment_method",
            OrderActionError::InvalidQuantity(_) => "invalid_quantity",
            OrderActionError::OrderLocked { .. } => "order_locked",
            OrderActionError::AlreadyInPayment => "already_in_payment",
            OrderActionError::AlreadyCompleted => "already_completed",
            OrderActionError::OrderCancelled => "order_cancelled",
            OrderActionError::EmptyOrder => "empty_order",
            OrderActionError::ItemsNotServed { .. } => "items_not_served",
            OrderActionError::NotAwaitingPayment => "not_awaiting_payment",
            OrderActionError::Store(_) => "store_error",
        }
    }
}

impl From<OrderActionError> for AppError {
    fn from(err: OrderActionError) -> Self {
        match &err {
            OrderActionError::OrderNotFound(_)
            | OrderActionError::ItemNotFound(_)
            | OrderActionError::TableNotFound(_)
            | OrderActionError::ModifierOptionNotFound(_) => AppError::NotFound(err.to_string()),

            OrderActionError::InvalidStatus(_)
            | OrderActionError::InvalidPaymentMethod(_)
            | OrderActionError::InvalidQuantity(_) => AppError::Validation(err.to_string()),

            OrderActionError::OrderLocked { .. }
            | OrderActionError::AlreadyInPayment
            | OrderActionError::AlreadyCompleted
            | OrderActionError::OrderCancelled
            | OrderActionError::EmptyOrder
            | OrderActionError::ItemsNotServed { .. }
            | OrderActionError::NotAwaitingPayment => AppError::BusinessRule {
                code: err.reason_code(),
                message: err.to_string(),
            },

            OrderActionError::Store(e) => match e {
                RepoError::Validation(msg) => AppError::Validation(msg.clone()),
                _ => AppError::Database(e.to_string()),
            },
        }
    }
}

pub type OrderActionResult<T> = Result<T, OrderActionError>;

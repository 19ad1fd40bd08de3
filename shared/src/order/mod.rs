//! Order domain types
//!
//! Status vocabularies for the order/item dual state machine, the payment
//! method list, and the full order aggregate broadcast to clients.

pub mod detail;
pub mod payment;
pub mod status;

// Re-exports
pub use detail::{MenuItemSummary, ModifierDetail, OrderDetail, OrderItemDetail, TableSummary};
pub use payment::PaymentMethod;
pub use status::{ItemStatus, OrderStatus};

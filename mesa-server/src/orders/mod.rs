//! Order lifecycle core
//!
//! The order/order-item dual state machine:
//!
//! - [`engine`] - pure transition rules: downward cascades from order to
//!   items, upward inference from items to order
//! - [`coordinator`] - orchestrates one transition end-to-end (validate →
//!   persist → reload aggregate → broadcast), serialized per order
//! - [`store`] - the persistence contract the coordinator consumes
//!
//! # Request flow
//!
//! ```text
//! actor action (kitchen / waiter / customer)
//!     ├─ 1. Acquire per-order lock
//!     ├─ 2. Validate preconditions (no partial writes)
//!     ├─ 3. Apply transition + cascades via the store
//!     ├─ 4. Reload the full aggregate
//!     ├─ 5. Broadcast on the order feed (fire-and-forget)
//!     └─ 6. Return the aggregate
//! ```

pub mod coordinator;
pub mod engine;
pub mod error;
pub mod locks;
pub mod store;

#[cfg(test)]
mod tests;

pub use coordinator::{CreateItemInput, OrderCoordinator};
pub use error::{OrderActionError, OrderActionResult};
pub use store::OrderStore;

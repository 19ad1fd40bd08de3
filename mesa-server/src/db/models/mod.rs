//! Database models
//!
//! Entities stored in SurrealDB. Record links are plain fields holding a
//! [`surrealdb::RecordId`]; IDs travel as `table:key` strings through the
//! API (see [`serde_helpers`]).

pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod serde_helpers;

pub use dining_table::DiningTable;
pub use menu_item::{MenuItem, ModifierOption};
pub use order::{Order, OrderItem, OrderItemModifier};

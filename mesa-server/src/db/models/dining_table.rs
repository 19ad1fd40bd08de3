//! Dining Table Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Dining table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Printed table number shown to guests, e.g. "A5"
    pub table_number: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub capacity: i32,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

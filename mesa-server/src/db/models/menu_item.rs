//! Menu catalog models
//!
//! Read-only here: catalog management lives outside this service.

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub prep_time_minutes: i32,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

/// Catalog modifier option (e.g. "extra cheese", "less sugar")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierOption {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub price_adjustment: Decimal,
}

fn default_true() -> bool {
    true
}

//! Kitchen Display API Module
//!
//! The kitchen's view of open orders, plus the two transition entry points
//! it owns: advancing a whole order and advancing a single dish.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/kitchen/orders", get(handler::list))
        .route("/api/admin/kitchen/stats", get(handler::stats))
        .route(
            "/api/admin/kitchen/orders/{id}/status",
            put(handler::update_order_status),
        )
        .route(
            "/api/admin/kitchen/items/{item_id}/status",
            put(handler::update_item_status),
        )
}

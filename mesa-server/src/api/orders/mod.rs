//! Waiter Console API Module
//!
//! Listing all orders and advancing order status (confirm, serve, cancel).

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/orders", get(handler::list))
        .route("/api/admin/orders/{id}/status", put(handler::update_status))
}

//! Customer API Module
//!
//! Endpoints for the customer device seated at a table: opening an order,
//! placing items, and driving the payment flow.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/customer/tables/{table_id}/orders",
            post(handler::open_order),
        )
        .route(
            "/api/customer/tables/{table_id}/active-order",
            get(handler::active_order),
        )
        .route("/api/customer/order-items", post(handler::create_item))
        .route(
            "/api/customer/orders/{id}/request-payment",
            post(handler::request_payment),
        )
        .route(
            "/api/customer/orders/{id}/complete-payment",
            post(handler::complete_payment),
        )
}

//! Waiter Console API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::orders::OrderStore;
use crate::utils::{AppError, AppResult};
use shared::order::OrderDetail;

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// GET /api/admin/orders - all orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_all(query.limit, query.offset).await?;

    let mut details = Vec::with_capacity(orders.len());
    for order in orders {
        let id = order
            .id
            .as_ref()
            .map(|id| id.to_string())
            .ok_or_else(|| AppError::internal("Order row without ID"))?;
        if let Some(detail) = repo.find_order_detail(&id, true).await? {
            details.push(detail);
        }
    }
    Ok(Json(details))
}

/// Request body for advancing an order
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// PUT /api/admin/orders/:id/status - advance the order status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state.coordinator.advance_order(&id, &payload.status).await?;
    Ok(Json(detail))
}

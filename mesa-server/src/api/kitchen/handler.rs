//! Kitchen Display API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::{KitchenStats, OrderRepository};
use crate::orders::OrderStore;
use crate::utils::{AppError, AppResult};
use shared::order::{OrderDetail, OrderStatus};
use shared::util::day_start_millis;

/// Statuses shown on the kitchen display by default (unfinished orders)
const DEFAULT_STATUSES: [OrderStatus; 4] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::Ready,
];

/// Query params for the kitchen order list
#[derive(Debug, Deserialize)]
pub struct KitchenQuery {
    /// Comma-separated status filter, e.g. `preparing,ready`
    #[serde(default)]
    pub status: Option<String>,
}

/// GET /api/admin/kitchen/orders - unfinished orders, oldest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<KitchenQuery>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let statuses: Vec<OrderStatus> = match &query.status {
        Some(raw) => raw
            .split(',')
            .map(|s| {
                s.trim()
                    .parse::<OrderStatus>()
                    .map_err(AppError::validation)
            })
            .collect::<Result<_, _>>()?,
        None => DEFAULT_STATUSES.to_vec(),
    };

    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_kitchen_orders(&statuses).await?;

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

/// GET /api/admin/kitchen/stats - display counters
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<KitchenStats>> {
    let repo = OrderRepository::new(state.db.clone());
    let stats = repo.kitchen_stats(day_start_millis()).await?;
    Ok(Json(stats))
}

/// Request body for advancing an order or an item
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// PUT /api/admin/kitchen/orders/:id/status - advance the order status
pub async fn update_order_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state.coordinator.advance_order(&id, &payload.status).await?;
    Ok(Json(detail))
}

/// PUT /api/admin/kitchen/items/:item_id/status - advance a single dish
pub async fn update_item_status(
    State(state): State<ServerState>,
    Path(item_id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state
        .coordinator
        .advance_item(&item_id, &payload.status)
        .await?;
    Ok(Json(detail))
}

//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::orders::{CreateItemInput, OrderStore};
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_TRANSACTION_ID_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::order::OrderDetail;

/// Request body for opening an order
#[derive(Debug, Deserialize, Default)]
pub struct OpenOrderRequest {
    #[serde(default)]
    pub customer_id: Option<String>,
}

/// POST /api/customer/tables/:table_id/orders - open (or resume) the
/// table's order
pub async fn open_order(
    State(state): State<ServerState>,
    Path(table_id): Path<String>,
    payload: Option<Json<OpenOrderRequest>>,
) -> AppResult<Json<OrderDetail>> {
    let request = payload.map(|Json(p)| p).unwrap_or_default();
    let detail = state
        .coordinator
        .open_order(&table_id, request.customer_id)
        .await?;
    Ok(Json(detail))
}

/// GET /api/customer/tables/:table_id/active-order
///
/// The table's current non-terminal order, or null when the table is free.
pub async fn active_order(
    State(state): State<ServerState>,
    Path(table_id): Path<String>,
) -> AppResult<Json<Option<OrderDetail>>> {
    let repo = crate::db::repository::OrderRepository::new(state.db.clone());
    let Some(order) = repo.find_active_order_by_table(&table_id).await? else {
        return Ok(Json(None));
    };
    let id = order
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Order row without ID"))?;
    let detail = repo.find_order_detail(&id, true).await?;
    Ok(Json(detail))
}

/// POST /api/customer/order-items - place a new item on an order
pub async fn create_item(
    State(state): State<ServerState>,
    Json(payload): Json<CreateItemInput>,
) -> AppResult<Json<OrderDetail>> {
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    let detail = state.coordinator.create_item(payload).await?;
    Ok(Json(detail))
}

/// Request body for requesting payment
#[derive(Debug, Deserialize)]
pub struct RequestPaymentRequest {
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
}

fn default_payment_method() -> String {
    "cash".to_string()
}

/// POST /api/customer/orders/:id/request-payment
pub async fn request_payment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RequestPaymentRequest>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state
        .coordinator
        .request_payment(&id, &payload.payment_method)
        .await?;
    Ok(Json(detail))
}

/// Request body for the payment-gateway completion callback
#[derive(Debug, Deserialize)]
pub struct CompletePaymentRequest {
    pub transaction_id: String,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// POST /api/customer/orders/:id/complete-payment
pub async fn complete_payment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CompletePaymentRequest>,
) -> AppResult<Json<OrderDetail>> {
    validate_required_text(
        &payload.transaction_id,
        "transaction_id",
        MAX_TRANSACTION_ID_LEN,
    )?;
    let detail = state
        .coordinator
        .complete_payment(
            &id,
            &payload.transaction_id,
            payload.payment_method.as_deref(),
        )
        .await?;
    Ok(Json(detail))
}

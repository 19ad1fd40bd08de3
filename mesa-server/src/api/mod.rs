//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`customer`] - 顾客端接口 (下单、请求结账)
//! - [`orders`] - 服务员控制台接口
//! - [`kitchen`] - 后厨显示屏接口
//! - [`ws`] - 实时订单推送 (WebSocket)

pub mod customer;
pub mod health;
pub mod kitchen;
pub mod orders;
pub mod ws;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(customer::router())
        .merge(orders::router())
        .merge(kitchen::router())
        .merge(ws::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

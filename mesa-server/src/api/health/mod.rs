//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/health | GET | 简单健康检查 | 无 |

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态 (ok | error)
    status: &'static str,
    version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

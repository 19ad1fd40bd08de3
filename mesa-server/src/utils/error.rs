//! 统一错误处理
//!
//! Application-level error type and response envelope:
//! - [`AppError`] - 应用错误枚举
//! - [`AppResponse`] - API 响应结构
//!
//! Every failure carries a stable snake_case reason code so clients can
//! branch on it without parsing messages. Domain failures from the order
//! coordinator keep their own reason codes; infrastructure failures map to
//! a generic 500 with details logged but not leaked.
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Order not found"))
//!
//! // 返回成功响应
//! Ok(Json(AppResponse::success(data)))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// API 统一响应结构
///
/// ```json
/// {
///   "code": "ok",
///   "message": "success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Reason code (`ok` on success)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Validation failed: {0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("{message}")]
    /// 业务规则违反 (422), carries the coordinator's reason code
    BusinessRule {
        code: &'static str,
        message: String,
    },

    // ========== 系统错误 (5xx) ==========
    #[error("Database error: {0}")]
    /// 数据库错误 (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),

            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }

            AppError::BusinessRule { code, message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, *code, message.clone())
            }

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Database error".to_string(),
                )
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "ok".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "ok".to_string(),
        message: message.into(),
        data: Some(data),
    })
}

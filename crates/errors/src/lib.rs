//! inventory-errors - 统一错误处理
//!
//! 所有错误响应统一为 `{"error": "<message>"}` JSON 格式

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn method_not_allowed(msg: impl Into<String>) -> Self {
        Self::MethodNotAllowed(msg.into())
    }

    pub fn payload_too_large(msg: impl Into<String>) -> Self {
        Self::PayloadTooLarge(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::MethodNotAllowed(_) => 405,
            Self::PayloadTooLarge(_) => 413,
            Self::Internal(_) => 500,
        }
    }

    /// 返回给客户端的消息（不带错误类别前缀）
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::MethodNotAllowed(msg)
            | Self::PayloadTooLarge(msg)
            | Self::Internal(msg) => msg,
        }
    }

    /// 转换为响应体
    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.message().to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(self.to_error_body())).into_response()
    }
}

/// 错误响应体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

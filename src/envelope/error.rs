//! Envelope Errors
//!
//! 信封写出阶段的错误：序列化失败与处理器主动中止。
//! 两者都不可恢复，由最外层的请求边界统一转换为 500 响应。

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// 兜底响应体（与信封格式一致）
pub const FALLBACK_BODY: &str = r#"{"code":500,"error":"internal server error","success":false}"#;

/// 信封错误
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// payload 无法序列化为 JSON（调用方的编程错误）
    #[error("failed to serialize response envelope: {0}")]
    Serialize(#[from] serde_json::Error),

    /// 处理器中止，信封已被标记为 suppressed
    #[error("request aborted: {reason}")]
    Aborted { reason: String },
}

impl EnvelopeError {
    pub fn aborted(reason: impl Into<String>) -> Self {
        Self::Aborted {
            reason: reason.into(),
        }
    }
}

/// 构造兜底 500 响应
pub fn fallback_response() -> Response {
    let mut response = (StatusCode::INTERNAL_SERVER_ERROR, FALLBACK_BODY).into_response();
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

impl IntoResponse for EnvelopeError {
    fn into_response(self) -> Response {
        match &self {
            EnvelopeError::Serialize(e) => {
                tracing::error!(error = %e, "Response envelope serialization failed");
            }
            EnvelopeError::Aborted { reason } => {
                tracing::error!(reason = %reason, "Request aborted by handler");
            }
        }

        fallback_response()
    }
}

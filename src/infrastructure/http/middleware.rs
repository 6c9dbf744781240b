//! HTTP Middleware
//!
//! 按响应状态码分级记录访问日志

use std::time::Instant;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// 访问日志中间件
///
/// 5xx 记 error，4xx 记 warn，304 与其它状态记 debug。
/// 信封内部的中止与序列化失败在 EnvelopeError::into_response() 中记录。
pub async fn access_log_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    } else if status == StatusCode::NOT_MODIFIED {
        tracing::debug!(method = %method, uri = %uri, elapsed_ms, "Conditional GET hit");
    } else {
        tracing::debug!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            elapsed_ms,
            "HTTP request served"
        );
    }

    response
}

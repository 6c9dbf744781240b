//! Ping Handler
//!
//! Health check endpoint

use axum::response::Response;
use serde::Serialize;

use crate::envelope::{EnvelopeError, RequestContext, ResponseEnvelope};

/// Ping 响应
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Ping endpoint - 健康检查
pub async fn ping(ctx: RequestContext) -> Result<Response, EnvelopeError> {
    ResponseEnvelope::ok(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
    .respond(&ctx)
}

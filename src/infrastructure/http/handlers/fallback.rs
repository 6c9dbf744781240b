//! Fallback Handler

use axum::response::Response;

use crate::envelope::{EnvelopeError, RequestContext, ResponseEnvelope};

/// 未匹配路由，返回 404 信封
pub async fn fallback(ctx: RequestContext) -> Result<Response, EnvelopeError> {
    ResponseEnvelope::<()>::not_found().respond(&ctx)
}

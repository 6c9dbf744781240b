//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping           GET  健康检查
//! - /api/items          GET  目录列表（?cursor=N 游标分页）
//! - /api/items/:id      GET  单条查询，不存在时返回 404 信封
//!
//! - 其它路径                    404 信封
//!
//! 所有接口支持 `?pretty=1` 与 If-None-Match 条件请求。

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .fallback(handlers::fallback)
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/items", get(handlers::list_items))
        .route("/items/:id", get(handlers::get_item))
}

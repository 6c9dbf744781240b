//! Item Handlers
//!
//! 目录列表（游标分页）与单条查询

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::envelope::{EnvelopeError, RequestContext, ResponseEnvelope};
use crate::infrastructure::http::state::{AppState, Item};

#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
    /// 起始偏移量，缺省为 0
    #[serde(default)]
    pub cursor: Option<String>,
}

/// 一页数据及相邻页游标（空串表示没有）
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a> {
    pub items: &'a [Item],
    pub next: String,
    pub prev: String,
}

/// 按偏移量切分目录
pub fn paginate(catalog: &[Item], offset: usize, page_size: usize) -> Page<'_> {
    let start = offset.min(catalog.len());
    let end = start.saturating_add(page_size).min(catalog.len());

    let next = if end < catalog.len() {
        end.to_string()
    } else {
        String::new()
    };
    let prev = if start > 0 {
        start.saturating_sub(page_size).to_string()
    } else {
        String::new()
    };

    Page {
        items: &catalog[start..end],
        next,
        prev,
    }
}

/// 列出目录
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    query: Result<Query<ListItemsQuery>, QueryRejection>,
) -> Result<Response, EnvelopeError> {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return reject(rejection.body_text(), &ctx),
    };

    let offset = match query.cursor.as_deref() {
        None | Some("") => 0,
        Some(cursor) => match cursor.parse::<usize>() {
            Ok(offset) => offset,
            Err(_) => return reject(format!("invalid cursor: {}", cursor), &ctx),
        },
    };

    let page = paginate(&state.catalog, offset, state.page_size);
    ResponseEnvelope::ok(page.items)
        .with_paging(page.next, page.prev)
        .respond(&ctx)
}

/// 查询单条
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Response, EnvelopeError> {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return reject(rejection.body_text(), &ctx),
    };

    match state.find_item(id) {
        Some(item) => ResponseEnvelope::ok(item).respond(&ctx),
        None => {
            tracing::debug!(id, "Item not found");
            ResponseEnvelope::<&Item>::not_found().respond(&ctx)
        }
    }
}

/// 请求参数错误统一以 400 信封返回
fn reject(message: String, ctx: &RequestContext) -> Result<Response, EnvelopeError> {
    tracing::debug!(error = %message, "Rejected request parameters");
    ResponseEnvelope::<()>::failure(message).respond(ctx)
}

//! Request Context
//!
//! 信封写出时需要的请求信息：pretty 参数与 If-None-Match

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{header::IF_NONE_MATCH, request::Parts, HeaderMap, Uri},
};

/// 美化输出参数名
const PRETTY_PARAM: &str = "pretty";

/// 请求上下文
///
/// `pretty` 只从 URL 查询串读取；POST 表单体（application/x-www-form-urlencoded）
/// 中的 `pretty` 不会被解析，需要美化输出时请放在查询串里。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// 是否以缩进格式输出（`?pretty=1`）
    pub pretty: bool,
    /// 条件请求校验值
    pub if_none_match: Option<String>,
}

impl RequestContext {
    pub fn new(pretty: bool, if_none_match: Option<String>) -> Self {
        Self {
            pretty,
            if_none_match,
        }
    }

    /// 从 URI 与请求头构造
    pub fn from_uri_and_headers(uri: &Uri, headers: &HeaderMap) -> Self {
        let if_none_match = headers
            .get(IF_NONE_MATCH)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        Self {
            pretty: pretty_requested(uri),
            if_none_match,
        }
    }
}

/// 同名参数取第一个值，仅 "1" 视为开启
fn pretty_requested(uri: &Uri) -> bool {
    let Ok(Query(pairs)) = Query::<Vec<(String, String)>>::try_from_uri(uri) else {
        return false;
    };

    pairs
        .iter()
        .find(|(key, _)| key == PRETTY_PARAM)
        .map(|(_, value)| value == "1")
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_uri_and_headers(&parts.uri, &parts.headers))
    }
}

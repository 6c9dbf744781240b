//! Response Envelope
//!
//! 所有接口统一的 JSON 响应信封：
//! - 成功：`{"code":200,"data":...,"paging":{...},"success":true}`
//! - 失败：`{"code":400,"error":"...","success":false}`
//!
//! 写出时负责状态码默认值、pretty 输出、ETag 条件请求（304）。

mod body;
mod error;
pub mod etag;
mod request;
mod transport;

pub use body::unescape_html;
pub use error::{fallback_response, EnvelopeError, FALLBACK_BODY};
pub use request::RequestContext;
pub use transport::Transport;

use axum::{
    body::{Body as HttpBody, Bytes},
    http::{
        header::{CONTENT_TYPE, ETAG},
        HeaderValue, StatusCode,
    },
    response::Response,
};
use serde::Serialize;

use self::body::{to_pretty_vec, Body, Paging};

/// 未找到时的默认错误信息
pub const NOT_FOUND_MESSAGE: &str = "not found";

/// 统一响应信封
///
/// 由单个请求处理器创建、填充并写出一次，不跨请求共享。
#[derive(Debug, Clone)]
pub struct ResponseEnvelope<T = serde_json::Value> {
    pub data: Option<T>,
    /// 非空时输出 error 而不输出 data
    pub error: String,
    pub next: String,
    pub previous: String,
    pub success: bool,
    /// None 表示未设置，写出时按规则补默认值
    pub code: Option<StatusCode>,
    suppressed: bool,
}

impl<T> Default for ResponseEnvelope<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: String::new(),
            next: String::new(),
            previous: String::new(),
            success: false,
            code: None,
            suppressed: false,
        }
    }
}

impl<T: Serialize> ResponseEnvelope<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 成功响应
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            success: true,
            ..Self::default()
        }
    }

    /// 业务失败响应，默认 400
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: Some(StatusCode::BAD_REQUEST),
            ..Self::default()
        }
    }

    /// 404 响应，写出时补 "not found"
    pub fn not_found() -> Self {
        Self {
            code: Some(StatusCode::NOT_FOUND),
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: StatusCode) -> Self {
        self.code = Some(code);
        self
    }

    /// 设置分页游标，空串表示无该方向
    pub fn with_paging(mut self, next: impl Into<String>, previous: impl Into<String>) -> Self {
        self.next = next.into();
        self.previous = previous.into();
        self
    }

    fn body(&self) -> Body<'_, T> {
        let code = self.code.map(|c| c.as_u16()).unwrap_or(0);

        if !self.error.is_empty() {
            return Body {
                code,
                data: None,
                error: Some(self.error.as_str()),
                paging: None,
                success: self.success,
            };
        }

        match &self.data {
            Some(data) => Body {
                code,
                data: Some(data),
                error: None,
                paging: Paging::from_cursors(&self.next, &self.previous),
                success: self.success,
            },
            None => Body {
                code,
                data: None,
                error: None,
                paging: None,
                success: self.success,
            },
        }
    }

    /// 序列化为紧凑 JSON
    pub fn serialize(&self) -> Result<Vec<u8>, EnvelopeError> {
        Ok(serde_json::to_vec(&self.body())?)
    }

    /// 序列化为 4 空格缩进 JSON
    pub fn serialize_pretty(&self) -> Result<Vec<u8>, EnvelopeError> {
        to_pretty_vec(&self.body())
    }

    /// 禁止后续写出
    pub fn suppress(&mut self) {
        self.suppressed = true;
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// 中止当前请求
    ///
    /// 先标记 suppressed，再返回错误交由外层统一处理，保证不会二次写出。
    pub fn abort(&mut self, reason: impl Into<String>) -> EnvelopeError {
        self.suppress();
        let err = EnvelopeError::aborted(reason);
        tracing::warn!(error = %err, "Response envelope aborted");
        err
    }

    /// 确定最终状态码（可能同时补上 error）
    pub fn resolve_status(&mut self) -> StatusCode {
        let status = if self.code == Some(StatusCode::NOT_FOUND) && self.error.is_empty() {
            self.error = NOT_FOUND_MESSAGE.to_string();
            StatusCode::NOT_FOUND
        } else if self.error.is_empty() && self.data.is_none() && !self.success {
            StatusCode::BAD_REQUEST
        } else {
            self.code.unwrap_or(StatusCode::OK)
        };

        self.code = Some(status);
        status
    }

    /// 写出响应
    ///
    /// 2xx 响应附带 ETag；If-None-Match 完全一致时只写 304，不写响应体。
    pub fn write<W: Transport + ?Sized>(
        &mut self,
        transport: &mut W,
        req: &RequestContext,
    ) -> Result<(), EnvelopeError> {
        if self.suppressed {
            tracing::debug!("Response envelope suppressed, skipping write");
            return Ok(());
        }

        let status = self.resolve_status();

        let out = if req.pretty {
            self.serialize_pretty()?
        } else {
            self.serialize()?
        };
        let out = unescape_html(&out);

        if status.is_success() {
            let tag = etag::fingerprint(&out);
            if let Ok(value) = HeaderValue::from_str(&tag) {
                transport.set_header(ETAG, value);
            }

            if etag::matches(req.if_none_match.as_deref(), &tag) {
                tracing::debug!(etag = %tag, "ETag matched, responding 304");
                transport.write_status(StatusCode::NOT_MODIFIED);
                return Ok(());
            }
        }

        transport.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        transport.write_status(status);
        transport.write_body(Bytes::from(out));

        Ok(())
    }

    /// 写出到新的 axum Response
    pub fn respond(mut self, req: &RequestContext) -> Result<Response, EnvelopeError> {
        let mut response = Response::new(HttpBody::empty());
        self.write(&mut response, req)?;
        Ok(response)
    }
}

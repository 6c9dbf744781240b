//! HTTP Transport
//!
//! 信封写出的目标端口：状态码、响应头、响应体

use axum::{
    body::{Body, Bytes},
    http::{HeaderName, HeaderValue, StatusCode},
    response::Response,
};

/// 响应写出端口
///
/// 一次 write 调用内按 set_header* -> write_status -> write_body 的顺序使用。
pub trait Transport {
    /// 设置响应头（覆盖同名头）
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// 写入状态码
    fn write_status(&mut self, status: StatusCode);

    /// 写入响应体
    fn write_body(&mut self, body: Bytes);
}

impl Transport for Response {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().insert(name, value);
    }

    fn write_status(&mut self, status: StatusCode) {
        *self.status_mut() = status;
    }

    fn write_body(&mut self, body: Bytes) {
        *self.body_mut() = Body::from(body);
    }
}

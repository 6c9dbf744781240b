//! Infrastructure Layer - 基础设施层
//!
//! 信封的 HTTP 接入：服务器、路由、中间件与示例处理器

pub mod http;

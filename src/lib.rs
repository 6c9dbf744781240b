//! json-envelope - 统一 JSON 响应信封
//!
//! 模块划分:
//! - envelope/: ResponseEnvelope，负责响应体结构、状态码默认值、pretty 输出与 ETag 条件请求
//! - config/: 多层级配置加载（默认值 < 配置文件 < 环境变量）
//! - infrastructure/http/: 基于信封的示例 API（服务器、路由、中间件、处理器）

pub mod config;
pub mod envelope;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
pub use envelope::{EnvelopeError, RequestContext, ResponseEnvelope, Transport};

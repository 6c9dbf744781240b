//! HTTP Handlers
//!
//! 所有处理器都以 ResponseEnvelope 写出响应

mod fallback;
mod items;
mod ping;

pub use fallback::*;
pub use items::*;
pub use ping::*;

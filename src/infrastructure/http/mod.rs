//! HTTP Layer - 基于 ResponseEnvelope 的示例 API

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::{AppState, Item};

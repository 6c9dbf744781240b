//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::any::Any;
use std::sync::Arc;

use axum::middleware;
use axum::response::Response;
use axum::Router;
use http::header::{CONTENT_TYPE, ETAG, IF_NONE_MATCH};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as CorsAny, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::access_log_middleware;
use super::routes::create_routes;
use super::state::AppState;
use crate::envelope::fallback_response;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 构建 Router
    pub fn build_router(&self) -> Router {
        with_layers(create_routes()).with_state(self.state.clone())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

/// 挂载中间件
///
/// 由内到外：panic 兜底 -> 访问日志 -> trace -> CORS
fn with_layers(router: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
    // 浏览器端需要读取 ETag 并回传 If-None-Match
    let cors = CorsLayer::new()
        .allow_origin(CorsAny)
        .allow_methods(CorsAny)
        .allow_headers([CONTENT_TYPE, IF_NONE_MATCH])
        .expose_headers([ETAG])
        .max_age(std::time::Duration::from_secs(3600));

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(access_log_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// 处理器 panic 时返回兜底 500 信封
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");
    fallback_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    use crate::envelope::{EnvelopeError, ResponseEnvelope, FALLBACK_BODY};

    async fn abort_handler() -> Result<Response, EnvelopeError> {
        let mut env = ResponseEnvelope::<Value>::new();
        Err(env.abort("catalog backend unavailable"))
    }

    async fn panic_handler() -> &'static str {
        panic!("handler exploded")
    }

    fn test_router() -> Router {
        let state = Arc::new(AppState::with_sample_catalog(2));
        let routes = create_routes()
            .route("/test/abort", get(abort_handler))
            .route("/test/panic", get(panic_handler));
        with_layers(routes).with_state(state)
    }

    async fn get_with(
        uri: &str,
        if_none_match: Option<&str>,
    ) -> (StatusCode, http::HeaderMap, String) {
        let mut builder = Request::builder().uri(uri);
        if let Some(tag) = if_none_match {
            builder = builder.header(IF_NONE_MATCH, tag);
        }
        let response = test_router()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_ping() {
        let (status, headers, body) = get_with("/api/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["data"]["status"], "ok");
        assert_eq!(value["code"], 200);
        assert_eq!(value["success"], true);
    }

    #[tokio::test]
    async fn test_list_items_paging_and_unescaped_html() {
        let (status, _, body) = get_with("/api/items", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"Salt & Pepper\""));
        assert!(body.contains("\"<Untitled>\""));

        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["data"].as_array().unwrap().len(), 2);
        assert_eq!(value["paging"]["next"], "2");
        assert!(value["paging"].get("prev").is_none());
    }

    #[tokio::test]
    async fn test_list_items_last_page() {
        let (_, _, body) = get_with("/api/items?cursor=4", None).await;
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["data"][0]["id"], 5);
        assert_eq!(value["paging"]["prev"], "2");
        assert!(value["paging"].get("next").is_none());
    }

    #[tokio::test]
    async fn test_list_items_invalid_cursor() {
        let (status, headers, body) = get_with("/api/items?cursor=abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(headers.get(ETAG).is_none());
        assert_eq!(
            body,
            r#"{"code":400,"error":"invalid cursor: abc","success":false}"#
        );
    }

    #[tokio::test]
    async fn test_get_item_non_numeric_id() {
        let (status, headers, body) = get_with("/api/items/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["code"], 400);
        assert_eq!(value["success"], false);
        assert!(value["error"].as_str().unwrap().contains("abc"));
        assert!(value.get("data").is_none());
    }

    #[tokio::test]
    async fn test_list_items_duplicate_cursor() {
        let (status, headers, body) = get_with("/api/items?cursor=1&cursor=2", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["code"], 400);
        assert!(!value["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route_returns_not_found_envelope() {
        for uri in ["/api/nope", "/nope"] {
            let (status, headers, body) = get_with(uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(headers[CONTENT_TYPE], "application/json");
            assert_eq!(body, r#"{"code":404,"error":"not found","success":false}"#);
        }
    }

    #[tokio::test]
    async fn test_get_item_not_found() {
        let (status, _, body) = get_with("/api/items/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"code":404,"error":"not found","success":false}"#);
    }

    #[tokio::test]
    async fn test_conditional_get_returns_304() {
        let (status, headers, body) = get_with("/api/items/3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.is_empty());
        let tag = headers[ETAG].to_str().unwrap().to_string();
        assert!(tag.starts_with('"') && tag.ends_with('"'));

        let (status, headers, body) = get_with("/api/items/3", Some(&tag)).await;
        assert_eq!(status, StatusCode::NOT_MODIFIED);
        assert!(body.is_empty());
        assert_eq!(headers[ETAG], tag.as_str());
    }

    #[tokio::test]
    async fn test_pretty_changes_etag() {
        let (_, plain_headers, plain) = get_with("/api/items/1", None).await;
        let (_, pretty_headers, pretty) = get_with("/api/items/1?pretty=1", None).await;

        assert!(pretty.contains("\n    \"code\": 200"));
        assert_ne!(plain_headers[ETAG], pretty_headers[ETAG]);

        let compacted: Value = serde_json::from_str(&pretty).unwrap();
        let reparsed: Value = serde_json::from_str(&plain).unwrap();
        assert_eq!(compacted, reparsed);
    }

    #[tokio::test]
    async fn test_abort_maps_to_fallback() {
        let (status, _, body) = get_with("/test/abort", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, FALLBACK_BODY);
    }

    #[tokio::test]
    async fn test_panic_maps_to_fallback() {
        let (status, headers, body) = get_with("/test/panic", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(body, FALLBACK_BODY);
    }

    #[test]
    fn test_server_addr() {
        assert_eq!(ServerConfig::new("127.0.0.1", 8080).addr(), "127.0.0.1:8080");
    }
}

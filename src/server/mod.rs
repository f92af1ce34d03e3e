//! HTTP server: router assembly, TCP bind, graceful shutdown.

pub mod api;
pub mod generate;
pub mod store;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::CorsLayer;

use api::SharedState;

/// Listen address configuration for the API server.
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Build the full application router. CORS is permissive: the tool is a
/// single-user local app and the browser client may live on another port.
pub fn build_router(state: SharedState) -> Router {
    api::api_router()
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Bind and serve until ctrl-c.
pub async fn start_server(config: ServerConfig, state: SharedState) -> Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let local_addr = listener.local_addr()?;
    tracing::info!(addr = %local_addr, "taskdeck API listening");
    println!("taskdeck API running at http://{}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    println!("Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    println!("\nShutting down...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GenerateError;
    use crate::server::api::AppState;
    use crate::server::generate::{CompletionBackend, TicketGenerator};
    use crate::server::store::TicketStore;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct UnusedBackend;

    #[async_trait]
    impl CompletionBackend for UnusedBackend {
        async fn complete(
            &self,
            _system: &str,
            _user: &str,
            _schema: serde_json::Value,
        ) -> Result<String, GenerateError> {
            Err(GenerateError::MissingContent)
        }
    }

    fn test_router() -> Router {
        let state = Arc::new(AppState {
            store: TicketStore::new(),
            generator: TicketGenerator::new(Arc::new(UnusedBackend)),
        });
        build_router(state)
    }

    #[tokio::test]
    async fn test_health_via_full_router() {
        let app = test_router();
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_routes_mounted() {
        let app = test_router();
        let req = Request::builder()
            .uri("/api/tickets")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
    }
}

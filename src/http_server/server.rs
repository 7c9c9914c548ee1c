//! HTTP server assembly.
//!
//! Combines the route groups into one router over the shared state and
//! serves it. CORS is permissive; the write routes are protected by
//! bearer tokens, not by origin.

use std::io;
use std::net::SocketAddr;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::observability::Logger;

use super::auth_routes::auth_routes;
use super::config::HttpServerConfig;
use super::report_routes::report_routes;
use super::state::SharedState;
use super::table_routes::table_routes;

/// The assembled HTTP server.
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Builds the server over the shared state.
    pub fn new(config: HttpServerConfig, state: SharedState) -> Self {
        let router = Self::build_router(state);
        Self { config, router }
    }

    fn build_router(state: SharedState) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/health", get(health_handler))
            .nest("/auth", auth_routes())
            .nest("/tables", table_routes())
            .nest("/reports", report_routes())
            .layer(cors)
            .with_state(state)
    }

    /// The configured socket address string.
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// The router (for in-process testing).
    pub fn router(self) -> Router {
        self.router
    }

    /// Binds and serves until the process exits.
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        Logger::info(
            "server_started",
            &[
                ("host", &self.config.host),
                ("port", &self.config.port.to_string()),
            ],
        );

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await
    }
}

async fn health_handler() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

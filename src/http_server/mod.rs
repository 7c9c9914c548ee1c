//! HTTP API.
//!
//! Route groups:
//! - `/auth/login`: token issuance
//! - `/tables/{table}/rows|backup|restore`: protected write operations
//! - `/reports/*`: read-only analytics
//! - `/health`: liveness probe

mod auth_routes;
mod config;
mod errors;
mod report_routes;
mod server;
mod state;
mod table_routes;

pub use config::HttpServerConfig;
pub use errors::ApiError;
pub use server::HttpServer;
pub use state::{AppState, SharedState};

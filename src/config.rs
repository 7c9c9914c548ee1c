//! Service configuration.
//!
//! Everything the process needs is supplied here: bind address, storage
//! locations, credentials, and limits. Paths are injectable so tests can
//! point the service at temporary directories.

use std::path::PathBuf;

use crate::http_server::HttpServerConfig;
use crate::ingest::DEFAULT_BATCH_LIMIT;

/// Full configuration of one service process.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP bind configuration.
    pub http: HttpServerConfig,
    /// Directory holding backup artifacts.
    pub backup_dir: PathBuf,
    /// Optional directory of seed CSV files loaded before serving.
    pub seed_dir: Option<PathBuf>,
    /// Maximum rows per ingestion call.
    pub batch_limit: usize,
    /// API username.
    pub username: String,
    /// API password.
    pub password: String,
    /// JWT signing secret. Generated per process when absent.
    pub jwt_secret: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            backup_dir: PathBuf::from("backups"),
            seed_dir: None,
            batch_limit: DEFAULT_BATCH_LIMIT,
            username: "admin".to_string(),
            password: "change-me".to_string(),
            jwt_secret: None,
        }
    }
}

//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ServiceConfig;
use crate::http_server::HttpServerConfig;
use crate::ingest::DEFAULT_BATCH_LIMIT;

/// hrvault: HR records ingestion, analytics, and table backup/restore.
#[derive(Debug, Parser)]
#[command(name = "hrvault", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load seed files (if configured) and serve the HTTP API.
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Host to bind.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind.
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Directory holding backup artifacts.
    #[arg(long, default_value = "backups")]
    pub backup_dir: PathBuf,

    /// Directory of seed CSV files to load before serving.
    #[arg(long)]
    pub seed_dir: Option<PathBuf>,

    /// Maximum rows accepted per ingestion call.
    #[arg(long, default_value_t = DEFAULT_BATCH_LIMIT)]
    pub batch_limit: usize,

    /// API username.
    #[arg(long, default_value = "admin")]
    pub username: String,

    /// API password.
    #[arg(long, default_value = "change-me")]
    pub password: String,

    /// JWT signing secret. A random one is generated when omitted, so
    /// tokens stop verifying across restarts.
    #[arg(long)]
    pub jwt_secret: Option<String>,
}

impl ServeArgs {
    /// Folds the flags into a service configuration.
    pub fn into_config(self) -> ServiceConfig {
        ServiceConfig {
            http: HttpServerConfig {
                host: self.host,
                port: self.port,
            },
            backup_dir: self.backup_dir,
            seed_dir: self.seed_dir,
            batch_limit: self.batch_limit,
            username: self.username,
            password: self.password,
            jwt_secret: self.jwt_secret,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::parse_from(["hrvault", "serve"]);
        let Command::Serve(args) = cli.command;
        let config = args.into_config();
        assert_eq!(config.http.port, 8000);
        assert_eq!(config.batch_limit, 1000);
        assert!(config.seed_dir.is_none());
    }

    #[test]
    fn test_serve_flags_override() {
        let cli = Cli::parse_from([
            "hrvault",
            "serve",
            "--port",
            "9100",
            "--seed-dir",
            "/data/seeds",
            "--batch-limit",
            "50",
        ]);
        let Command::Serve(args) = cli.command;
        let config = args.into_config();
        assert_eq!(config.http.port, 9100);
        assert_eq!(config.seed_dir, Some(PathBuf::from("/data/seeds")));
        assert_eq!(config.batch_limit, 50);
    }
}

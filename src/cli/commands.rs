//! CLI command dispatch.

use std::sync::Arc;

use clap::Parser;

use crate::auth::{self, AuthService, Credentials, JwtConfig};
use crate::backup::BackupStore;
use crate::config::ServiceConfig;
use crate::http_server::{AppState, HttpServer};
use crate::ingest::loader;
use crate::observability::Logger;
use crate::store::RowStore;

use super::args::{Cli, Command};
use super::errors::CliResult;

/// Parses the process arguments and runs the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => serve(args.into_config()),
    }
}

/// Builds the service from its configuration, loads seed files, and
/// serves until the process exits.
pub fn serve(config: ServiceConfig) -> CliResult<()> {
    let store = Arc::new(RowStore::new());

    if let Some(seed_dir) = &config.seed_dir {
        loader::load_seed_dir(&store, seed_dir)?;
    }

    let secret = match config.jwt_secret.clone() {
        Some(secret) => secret,
        None => {
            Logger::warn("jwt_secret_generated", &[]);
            auth::generate_secret()
        }
    };
    let auth = AuthService::new(
        Credentials {
            username: config.username.clone(),
            password: config.password.clone(),
        },
        JwtConfig::new(secret),
    );

    let backups = BackupStore::new(&config.backup_dir);
    let state = Arc::new(AppState::new(store, backups, auth, config.batch_limit));
    let server = HttpServer::new(config.http.clone(), state);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start())?;
    Ok(())
}

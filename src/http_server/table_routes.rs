//! Table HTTP routes: ingestion, backup, and restore.
//!
//! All three are protected; the bearer token is checked before the table
//! name is even resolved. The table path segment is parsed once into a
//! `Table` and unknown names get a 404.

use std::collections::BTreeMap;

use axum::extract::{Json, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backup::create_backup;
use crate::observability::Logger;
use crate::restore::RestoreCoordinator;
use crate::schema::Table;

use super::errors::ApiError;
use super::state::SharedState;

/// Routes under `/tables`.
pub fn table_routes() -> Router<SharedState> {
    Router::new()
        .route("/{table}/rows", post(ingest_handler))
        .route("/{table}/backup", post(backup_handler))
        .route("/{table}/restore", post(restore_handler))
}

/// Body of backup and restore requests.
#[derive(Debug, Deserialize)]
pub struct ArtifactRequest {
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub message: String,
    pub accepted: usize,
    pub skipped: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct BackupResponse {
    pub message: String,
    pub table: String,
    pub label: String,
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct RestoreResponse {
    pub message: String,
    pub table: String,
    pub label: String,
    pub rows_restored: usize,
}

async fn ingest_handler(
    State(state): State<SharedState>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(rows): Json<Vec<Value>>,
) -> Result<(StatusCode, Json<IngestResponse>), ApiError> {
    state.authorize(&headers)?;
    let table: Table = table.parse()?;

    let report = state.ingestor.ingest(table, &rows)?;
    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            message: "data inserted".to_string(),
            accepted: report.accepted,
            skipped: report.skipped,
        }),
    ))
}

async fn backup_handler(
    State(state): State<SharedState>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(request): Json<ArtifactRequest>,
) -> Result<(StatusCode, Json<BackupResponse>), ApiError> {
    state.authorize(&headers)?;
    let table: Table = table.parse()?;

    let location = create_backup(&state.store, &state.backups, table, &request.label)?;
    Logger::info(
        "backup_created",
        &[
            ("table", table.name()),
            ("label", &request.label),
            ("location", &location.display().to_string()),
        ],
    );

    Ok((
        StatusCode::CREATED,
        Json(BackupResponse {
            message: format!("backup created for table {}", table.name()),
            table: table.name().to_string(),
            label: request.label,
            location: location.display().to_string(),
        }),
    ))
}

async fn restore_handler(
    State(state): State<SharedState>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(request): Json<ArtifactRequest>,
) -> Result<Json<RestoreResponse>, ApiError> {
    state.authorize(&headers)?;
    let table: Table = table.parse()?;

    let outcome =
        RestoreCoordinator::new(&state.store, &state.backups).restore(table, &request.label)?;
    Logger::info(
        "table_restored",
        &[
            ("table", outcome.table),
            ("label", &outcome.label),
            ("rows", &outcome.rows_restored.to_string()),
        ],
    );

    Ok(Json(RestoreResponse {
        message: format!(
            "data restored for table {} from backup {}",
            outcome.table, outcome.label
        ),
        table: outcome.table.to_string(),
        label: outcome.label,
        rows_restored: outcome.rows_restored,
    }))
}

//! Analytical report routes.
//!
//! The reports are read-only and unauthenticated.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::reports::{self, DepartmentAboveMean, QuarterlyHires};

use super::state::SharedState;

/// Routes under `/reports`.
pub fn report_routes() -> Router<SharedState> {
    Router::new()
        .route("/hires-by-quarter", get(hires_by_quarter_handler))
        .route(
            "/departments-above-mean",
            get(departments_above_mean_handler),
        )
}

#[derive(Debug, Deserialize)]
pub struct ReportParams {
    #[serde(default = "default_year")]
    pub year: i32,
}

fn default_year() -> i32 {
    2021
}

async fn hires_by_quarter_handler(
    State(state): State<SharedState>,
    Query(params): Query<ReportParams>,
) -> Json<Vec<QuarterlyHires>> {
    Json(reports::hires_by_quarter(&state.store, params.year))
}

async fn departments_above_mean_handler(
    State(state): State<SharedState>,
    Query(params): Query<ReportParams>,
) -> Json<Vec<DepartmentAboveMean>> {
    Json(reports::departments_above_mean(&state.store, params.year))
}

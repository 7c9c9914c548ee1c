//! Auth HTTP routes.

use axum::extract::{Json, State};
use axum::routing::post;
use axum::Router;
use serde::Deserialize;

use crate::auth::TokenResponse;

use super::errors::ApiError;
use super::state::SharedState;

/// Routes under `/auth`.
pub fn auth_routes() -> Router<SharedState> {
    Router::new().route("/login", post(login_handler))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

async fn login_handler(
    State(state): State<SharedState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let tokens = state.auth.login(&request.username, &request.password)?;
    Ok(Json(tokens))
}

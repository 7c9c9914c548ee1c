//! HTTP error mapping.
//!
//! Every domain error converts into an `ApiError` carrying the status
//! code and a JSON body of the form `{"error": ..., "code": ...}`, so
//! handlers can use `?` throughout. No domain error is process-fatal.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::backup::BackupError;
use crate::ingest::IngestError;
use crate::restore::RestoreError;
use crate::schema::UnknownTable;

/// A JSON error response with its HTTP status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    /// A plain `{"error", "code"}` response.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({
                "error": message.into(),
                "code": status.as_u16(),
            }),
        }
    }

    /// Same, with one extra detail field attached.
    pub fn with_details(
        status: StatusCode,
        message: impl Into<String>,
        key: &str,
        details: Value,
    ) -> Self {
        let mut err = Self::new(status, message);
        if let Value::Object(map) = &mut err.body {
            map.insert(key.to_string(), details);
        }
        err
    }

    /// The HTTP status (for tests).
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The JSON body (for tests).
    pub fn body(&self) -> &Value {
        &self.body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, err.to_string())
    }
}

impl From<UnknownTable> for ApiError {
    fn from(err: UnknownTable) -> Self {
        Self::new(StatusCode::NOT_FOUND, err.to_string())
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::SizeLimit { .. } => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            IngestError::AllRejected { ref skipped } => {
                let details = serde_json::to_value(skipped).unwrap_or_default();
                Self::with_details(StatusCode::BAD_REQUEST, err.to_string(), "skipped", details)
            }
            IngestError::WriteConflict(_) => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
        }
    }
}

impl From<BackupError> for ApiError {
    fn from(err: BackupError) -> Self {
        let status = match err {
            BackupError::InvalidLabel(_) => StatusCode::BAD_REQUEST,
            BackupError::NotFound { .. } => StatusCode::NOT_FOUND,
            BackupError::Io { .. } | BackupError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<RestoreError> for ApiError {
    fn from(err: RestoreError) -> Self {
        let status = match err {
            RestoreError::ArtifactNotFound { .. } => StatusCode::NOT_FOUND,
            RestoreError::Decode(_) | RestoreError::SchemaMismatch { .. } => {
                StatusCode::BAD_REQUEST
            }
            RestoreError::Artifact(_)
            | RestoreError::ClearFailed { .. }
            | RestoreError::LoadFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_body_shape() {
        let err = ApiError::new(StatusCode::NOT_FOUND, "table 'x' not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.body()["code"], 404);
        assert_eq!(err.body()["error"], "table 'x' not found");
    }

    #[test]
    fn test_all_rejected_keeps_rejection_map() {
        let mut skipped = BTreeMap::new();
        skipped.insert(
            "{\"id\":\"x\"}".to_string(),
            vec!["non-numeric value in field id".to_string()],
        );
        let err = ApiError::from(IngestError::AllRejected { skipped });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.body()["skipped"]["{\"id\":\"x\"}"][0]
            .as_str()
            .unwrap()
            .contains("non-numeric"));
    }

    #[test]
    fn test_restore_statuses() {
        let not_found = ApiError::from(RestoreError::ArtifactNotFound {
            table: "jobs",
            label: "x".to_string(),
        });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let mismatch = ApiError::from(RestoreError::SchemaMismatch {
            table: "jobs",
            expected: vec![],
            found: vec![],
        });
        assert_eq!(mismatch.status(), StatusCode::BAD_REQUEST);

        let load = ApiError::from(RestoreError::LoadFailed {
            table: "jobs",
            detail: "boom".to_string(),
        });
        assert_eq!(load.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_auth_maps_to_unauthorized() {
        let err = ApiError::from(AuthError::MissingToken);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}

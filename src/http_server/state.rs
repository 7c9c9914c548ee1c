//! Shared request state.

use std::sync::Arc;

use axum::http::{header, HeaderMap};

use crate::auth::{AuthError, AuthResult, AuthService, JwtClaims};
use crate::backup::BackupStore;
use crate::ingest::BatchIngestor;
use crate::store::RowStore;

/// Everything a handler needs, constructed once at startup and shared.
pub struct AppState {
    pub store: Arc<RowStore>,
    pub backups: BackupStore,
    pub auth: AuthService,
    pub ingestor: BatchIngestor,
}

/// Handlers receive the state behind an `Arc`.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(
        store: Arc<RowStore>,
        backups: BackupStore,
        auth: AuthService,
        batch_limit: usize,
    ) -> Self {
        let ingestor = BatchIngestor::new(store.clone(), batch_limit);
        Self {
            store,
            backups,
            auth,
            ingestor,
        }
    }

    /// Extracts and verifies the bearer token of a protected request.
    pub fn authorize(&self, headers: &HeaderMap) -> AuthResult<JwtClaims> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AuthError::MissingToken)?;
        self.auth.verify_token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, JwtConfig};
    use tempfile::TempDir;

    fn state(tmp: &TempDir) -> AppState {
        AppState::new(
            Arc::new(RowStore::new()),
            BackupStore::new(tmp.path()),
            AuthService::new(
                Credentials {
                    username: "admin".to_string(),
                    password: "pw".to_string(),
                },
                JwtConfig::new("secret"),
            ),
            1000,
        )
    }

    #[test]
    fn test_authorize_accepts_fresh_token() {
        let tmp = TempDir::new().unwrap();
        let state = state(&tmp);
        let token = state.auth.login("admin", "pw").unwrap().access_token;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );

        let claims = state.authorize(&headers).unwrap();
        assert_eq!(claims.sub, "admin");
    }

    #[test]
    fn test_authorize_requires_header() {
        let tmp = TempDir::new().unwrap();
        let state = state(&tmp);
        let err = state.authorize(&HeaderMap::new()).unwrap_err();
        assert_eq!(err, AuthError::MissingToken);
    }

    #[test]
    fn test_authorize_requires_bearer_scheme() {
        let tmp = TempDir::new().unwrap();
        let state = state(&tmp);
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        let err = state.authorize(&headers).unwrap_err();
        assert_eq!(err, AuthError::MissingToken);
    }
}

//! Auth error types.

use thiserror::Error;

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Wrong username or password (deliberately not saying which).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No bearer token on a protected request.
    #[error("missing bearer token")]
    MissingToken,

    /// Token did not parse.
    #[error("malformed token")]
    MalformedToken,

    /// Token expired.
    #[error("token expired")]
    TokenExpired,

    /// Token signature did not verify.
    #[error("invalid token signature")]
    InvalidSignature,

    /// Token could not be generated.
    #[error("internal error: token generation failed")]
    TokenGenerationFailed,
}

impl AuthError {
    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::MalformedToken
            | AuthError::TokenExpired
            | AuthError::InvalidSignature => 401,
            AuthError::TokenGenerationFailed => 500,
        }
    }
}

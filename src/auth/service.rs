//! Credential checking and token issuance.

use subtle::ConstantTimeEq;

use super::errors::{AuthError, AuthResult};
use super::jwt::{JwtClaims, JwtConfig, JwtManager, TokenResponse};

/// The single API credential pair, supplied at startup.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Authentication service: one configured credential pair, stateless
/// tokens.
#[derive(Clone)]
pub struct AuthService {
    credentials: Credentials,
    jwt: JwtManager,
}

impl AuthService {
    pub fn new(credentials: Credentials, jwt_config: JwtConfig) -> Self {
        Self {
            credentials,
            jwt: JwtManager::new(jwt_config),
        }
    }

    /// Checks the credential pair and issues an access token.
    ///
    /// Both comparisons run in constant time and are combined before the
    /// branch, so the response does not reveal which half was wrong.
    pub fn login(&self, username: &str, password: &str) -> AuthResult<TokenResponse> {
        let user_ok = username
            .as_bytes()
            .ct_eq(self.credentials.username.as_bytes());
        let pass_ok = password
            .as_bytes()
            .ct_eq(self.credentials.password.as_bytes());

        if !bool::from(user_ok & pass_ok) {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.jwt.generate_token(username)?;
        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.jwt.ttl_seconds(),
        })
    }

    /// Validates a bearer token and returns its claims.
    pub fn verify_token(&self, token: &str) -> AuthResult<JwtClaims> {
        self.jwt.validate_token(token)
    }
}

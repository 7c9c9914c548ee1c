//! JWT token generation and validation.
//!
//! Stateless HS256 tokens: validation needs no lookup beyond the signing
//! secret. Tokens carry no secrets, only the subject and timing claims.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::errors::{AuthError, AuthResult};

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (the username that logged in).
    pub sub: String,
    /// Issued at (Unix epoch seconds).
    pub iat: i64,
    /// Expiration (Unix epoch seconds).
    pub exp: i64,
    /// Issuer.
    pub iss: String,
}

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret.
    pub secret: String,
    /// Access token lifetime.
    pub token_ttl: Duration,
    /// Issuer identifier.
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl: Duration::minutes(15),
            issuer: "hrvault".to_string(),
        }
    }
}

/// Generates a random signing secret for deployments that did not
/// configure one. Tokens stop verifying across restarts in that mode.
pub fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}

/// Token manager: generation and stateless validation.
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issues an access token for a subject.
    pub fn generate_token(&self, subject: &str) -> AuthResult<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.config.token_ttl).timestamp(),
            iss: self.config.issuer.clone(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenGenerationFailed)
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> AuthResult<JwtClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);

        let data = decode::<JwtClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            }
        })?;

        Ok(data.claims)
    }

    /// Token lifetime in seconds, for login responses.
    pub fn ttl_seconds(&self) -> i64 {
        self.config.token_ttl.num_seconds()
    }
}

/// Body returned by a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

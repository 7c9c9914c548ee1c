//! Authentication: credential checking and stateless JWT access tokens.

mod errors;
mod jwt;
mod service;

pub use errors::{AuthError, AuthResult};
pub use jwt::{generate_secret, JwtClaims, JwtConfig, JwtManager, TokenResponse};
pub use service::{AuthService, Credentials};

//! JWT creation and verification for session tokens.
//!
//! Tokens are HS256-signed and carry the principal's ID and username. Note
//! that a token that verifies here is not necessarily a live session: the
//! session registry in [`crate::session`] is the liveness source of truth.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::env;
use std::time::Duration;

use relawan_cache::CacheError;

use crate::claims::Claims;

/// Error type for authentication operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Failed to create token: {0}")]
    TokenCreation(#[source] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// JWT configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `JWT_SECRET`: HMAC signing secret
/// - `SESSION_TTL_SECONDS`: Session token lifetime in seconds (default: `3600`)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HMAC secret used to sign and verify tokens.
    pub secret: String,

    /// Session lifetime, shared by the JWT `exp` claim and the registry TTL.
    pub session_ttl_seconds: u64,
}

impl JwtConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "insecure-dev-secret-change-me".to_string()),
            session_ttl_seconds: env::var("SESSION_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
        }
    }

    /// Session lifetime as a [`Duration`].
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_seconds)
    }
}

/// Creates a session token for a principal.
///
/// # Errors
///
/// Returns [`AuthError::TokenCreation`] if encoding fails.
pub fn create_session_token(
    principal_id: i64,
    username: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.session_ttl_seconds as usize;

    let claims = Claims {
        sub: principal_id,
        username: username.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(AuthError::TokenCreation)
}

/// Verifies a session token's signature and expiry, returning the claims.
///
/// # Errors
///
/// Returns [`AuthError::InvalidToken`] if the signature is invalid, the
/// token has expired, or the token is malformed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            session_ttl_seconds: 3600,
        }
    }

    #[test]
    fn create_and_verify_round_trip() {
        let config = test_config();

        let token = create_session_token(7, "andi", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "andi");
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let config = test_config();
        assert!(verify_token("not-a-token", &config).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = test_config();
        let token = create_session_token(7, "andi", &config).unwrap();

        let other = JwtConfig {
            secret: "different-secret-key-at-least-32-chars".to_string(),
            session_ttl_seconds: 3600,
        };

        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp() as usize;

        let claims = Claims {
            sub: 7,
            username: "andi".to_string(),
            exp: now - 120,
            iat: now - 3720,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, &config).is_err());
    }
}

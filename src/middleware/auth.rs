//! Bearer-token guard extractors, one per role.
//!
//! A request is authenticated only when all four checks pass: the
//! Authorization header carries a bearer token, the token verifies, the
//! token has not been denylisted by a logout, and the role's session
//! registry entry for the token's username holds this exact token. A token
//! that verifies cryptographically but has no matching registry entry is a
//! dead session.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use relawan_auth::{Role, verify_token};

use crate::state::AppState;
use crate::utils::errors::AppError;

/// The authenticated principal, exposed to handlers for ownership checks.
#[derive(Debug, Clone)]
pub struct AuthPrincipal {
    pub id: i64,
    pub username: String,
    /// Raw bearer token, needed again at logout.
    pub token: String,
}

impl AuthPrincipal {
    /// Owner-scoped mutations must target the caller's own row.
    pub fn require_owner(&self, path_id: i64) -> Result<(), AppError> {
        if self.id != path_id {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You can only modify your own data"
            )));
        }
        Ok(())
    }
}

/// Extracts the raw bearer token, if the Authorization header carries one.
pub fn bearer_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    bearer_from_headers(&parts.headers)
        .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Missing or malformed authorization header")))
}

async fn authorize(parts: &Parts, state: &AppState, role: Role) -> Result<AuthPrincipal, AppError> {
    let token = bearer_token(parts)?;

    let claims = verify_token(token, &state.jwt_config)
        .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid or expired token")))?;

    let sessions = state.sessions()?;

    if sessions.is_denylisted(token).await? {
        return Err(AppError::unauthorized(anyhow::anyhow!(
            "Invalid or expired token"
        )));
    }

    if !sessions.is_live(role, &claims.username, token).await? {
        return Err(AppError::unauthorized(anyhow::anyhow!(
            "Session expired, please login again"
        )));
    }

    Ok(AuthPrincipal {
        id: claims.sub,
        username: claims.username,
        token: token.to_string(),
    })
}

macro_rules! role_extractor {
    ($name:ident, $role:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub AuthPrincipal);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let principal = authorize(parts, state, $role).await?;
                Ok($name(principal))
            }
        }
    };
}

role_extractor!(UserAuth, Role::User);
role_extractor!(EmployerAuth, Role::Employer);
role_extractor!(AdminAuth, Role::Admin);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_check() {
        let principal = AuthPrincipal {
            id: 7,
            username: "andi".to_string(),
            token: "tok".to_string(),
        };

        assert!(principal.require_owner(7).is_ok());
        let err = principal.require_owner(8).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
    }
}

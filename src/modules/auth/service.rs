//! The login and logout protocol shared by all three roles.
//!
//! Login runs a fixed sequence: lockout check, existing-session
//! short-circuit, credential verification, then either the failure path
//! (attempt counting, lockout at the fifth failure) or the success path
//! (issue a JWT, record it in the session registry, clear the counter).
//! The role services only differ in how they load the [`Principal`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::instrument;

use relawan_auth::{
    FailedAttempt, JwtConfig, LoginThrottle, Role, SessionStore, ThrottleStatus,
    create_session_token, verify_token,
};

use crate::modules::auth::model::{Principal, SessionData};
use crate::utils::errors::AppError;
use crate::utils::password::verify_password;

/// Outcome of a login attempt; maps one-to-one onto a response status.
#[derive(Debug)]
pub enum LoginOutcome {
    /// 200. `reused` is true when a live session already existed.
    Authenticated { data: SessionData, reused: bool },
    /// 401 with the number of attempts left before a lockout.
    BadCredentials { attempts_left: i64 },
    /// 429 with the seconds until the lockout clears itself.
    LockedOut { retry_after_seconds: i64 },
}

impl IntoResponse for LoginOutcome {
    fn into_response(self) -> Response {
        match self {
            LoginOutcome::Authenticated { data, reused } => {
                let message = if reused {
                    "Already logged in"
                } else {
                    "Login successful"
                };
                let body = Json(json!({
                    "success": true,
                    "message": message,
                    "data": data
                }));
                (StatusCode::OK, body).into_response()
            }
            LoginOutcome::BadCredentials { attempts_left } => {
                let body = Json(json!({
                    "success": false,
                    "message": "Invalid username or password",
                    "attempts_left": attempts_left
                }));
                (StatusCode::UNAUTHORIZED, body).into_response()
            }
            LoginOutcome::LockedOut {
                retry_after_seconds,
            } => {
                let body = Json(json!({
                    "success": false,
                    "message": "Too many login attempts. Try again later.",
                    "retry_after_seconds": retry_after_seconds
                }));
                (StatusCode::TOO_MANY_REQUESTS, body).into_response()
            }
        }
    }
}

pub struct AuthService;

impl AuthService {
    /// Runs the login protocol for a role.
    ///
    /// `principal` is the row matching the submitted username, if any; an
    /// unknown username and a wrong password are indistinguishable to the
    /// caller and both count against the throttle.
    #[instrument(skip_all, fields(%role, %username))]
    pub async fn login(
        sessions: &SessionStore,
        throttle: &LoginThrottle,
        jwt_config: &JwtConfig,
        role: Role,
        username: &str,
        principal: Option<Principal>,
        password: &str,
    ) -> Result<LoginOutcome, AppError> {
        if let ThrottleStatus::Blocked {
            retry_after_seconds,
        } = throttle.check(username).await?
        {
            return Ok(LoginOutcome::LockedOut {
                retry_after_seconds,
            });
        }

        // A live session short-circuits the credential work, but the row
        // backing it must still exist
        if let Some(token) = sessions.find(role, username).await? {
            let principal = principal
                .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Account not found")))?;
            return Ok(LoginOutcome::Authenticated {
                data: SessionData {
                    id: principal.id,
                    username: principal.username,
                    name: principal.name,
                    token,
                },
                reused: true,
            });
        }

        let verified = match &principal {
            Some(principal) => verify_password(password, &principal.password_hash)?,
            None => false,
        };

        if !verified {
            return match throttle.record_failure(username).await? {
                FailedAttempt::AttemptsLeft(attempts_left) => {
                    Ok(LoginOutcome::BadCredentials { attempts_left })
                }
                FailedAttempt::LockedOut {
                    retry_after_seconds,
                } => Ok(LoginOutcome::LockedOut {
                    retry_after_seconds,
                }),
            };
        }

        let principal = principal.ok_or_else(|| {
            // unreachable: verified implies Some, but never panic in a handler path
            AppError::internal(anyhow::anyhow!("Verified login without a principal"))
        })?;

        throttle.clear(username).await?;

        let token = create_session_token(principal.id, &principal.username, jwt_config)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to issue token: {e}")))?;
        sessions.store(role, &principal.username, &token).await?;

        Ok(LoginOutcome::Authenticated {
            data: SessionData {
                id: principal.id,
                username: principal.username,
                name: principal.name,
                token,
            },
            reused: false,
        })
    }

    /// Ends a session: deletes the registry key and denylists the token.
    ///
    /// Succeeds even when the registry key is already gone. A missing or
    /// undecodable token is a 400.
    #[instrument(skip_all, fields(%role))]
    pub async fn logout(
        sessions: &SessionStore,
        jwt_config: &JwtConfig,
        role: Role,
        token: &str,
    ) -> Result<(), AppError> {
        let claims = verify_token(token, jwt_config)
            .map_err(|_| AppError::bad_request(anyhow::anyhow!("Invalid token")))?;

        sessions.revoke(role, &claims.username, token).await?;

        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginDto {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Payload of a successful login: the caller's profile summary plus the
/// session token.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionData {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub token: String,
}

/// A login candidate loaded by a role service: the row's identity plus its
/// bcrypt hash. `None` upstream means the username is unknown, which follows
/// the same failure path as a wrong password.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}

//! JWT claim structure for session tokens.

use serde::{Deserialize, Serialize};

/// JWT claims for a session token.
///
/// # Fields
///
/// - `sub`: Principal's database ID (subject)
/// - `username`: Principal's username, used to locate the session registry key
/// - `exp`: Token expiration timestamp
/// - `iat`: Token issued-at timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal ID (subject claim)
    pub sub: i64,
    /// Principal's username
    pub username: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

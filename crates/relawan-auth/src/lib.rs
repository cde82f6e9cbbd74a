//! # Relawan Auth
//!
//! Authentication primitives for the Relawan API.
//!
//! This crate provides:
//!
//! - [`claims`]: the JWT claim structure for session tokens
//! - [`jwt`]: token creation and verification
//! - [`role`]: the three principal roles and their session registry keys
//! - [`session`]: the Redis session registry and token denylist
//! - [`throttle`]: the per-username login throttle state machine
//!
//! # Session model
//!
//! A login issues a JWT and records it in Redis under
//! `{role}:token:{username}` with a 1 hour TTL. The registry key is the
//! liveness source of truth: a request is authenticated only when its token
//! both decodes and still has a live registry entry. Logout deletes the
//! registry key and denylists the raw token's digest so it cannot be
//! replayed for its remaining JWT lifetime.

pub mod claims;
pub mod jwt;
pub mod role;
pub mod session;
pub mod throttle;

pub use claims::Claims;
pub use jwt::{AuthError, JwtConfig, create_session_token, verify_token};
pub use role::Role;
pub use session::SessionStore;
pub use throttle::{FailedAttempt, LoginThrottle, ThrottleStatus};

//! Configuration modules for the Relawan API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables.
//!
//! # Modules
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL database connection pool initialization
//!
//! JWT and cache settings live with the crates that use them
//! (`relawan_auth::JwtConfig`, `relawan_cache::CacheConfig`).

pub mod cors;
pub mod database;

//! Database configuration and connection pool initialization.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//!
//! # Panics
//!
//! [`init_db_pool`] panics if `DATABASE_URL` is unset or the connection
//! cannot be established; the server cannot run without a database.

use sqlx::PgPool;
use std::env;

/// Initializes the PostgreSQL connection pool.
///
/// Called once during startup. The returned pool is cheaply cloneable and
/// lives in the application state.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

//! # Relawan Cache
//!
//! Redis-based cache-aside utilities for the Relawan API.
//!
//! This crate provides:
//! - Redis connection management and typed cache operations
//! - The generic [`read_through`] cache-aside helper
//! - Cache key generation for every cached view in the system
//! - A declarative invalidation table ([`Mutation`]) mapping each write
//!   operation to the set of cache keys it makes stale
//!
//! # Example
//!
//! ```ignore
//! use relawan_cache::{CacheConfig, Mutation, RedisCache, invalidate, read_through};
//!
//! let config = CacheConfig::from_env();
//! let cache = RedisCache::new(&config.redis_url, config.default_ttl()).await?;
//!
//! // Read through the cache
//! let (user, source) = read_through(Some(&cache), &keys::users::profile(7), || async {
//!     load_user_from_db(7).await
//! })
//! .await?;
//!
//! // After a write, invalidate everything the write made stale
//! invalidate(Some(&cache), Mutation::UserProfileUpdated { user_id: 7 }).await;
//! ```

pub mod config;
pub mod keys;
pub mod redis;

pub use config::CacheConfig;
pub use keys::{Mutation, invalidate};
pub use redis::{CacheError, CacheSource, RedisCache, read_through};

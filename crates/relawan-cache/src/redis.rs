//! Redis client for caching and protocol state.
//!
//! Provides async Redis operations with JSON serialization for cached values,
//! plus raw string and counter operations used by the session registry and
//! login throttle.

use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Redis client with connection pooling.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    default_ttl: Duration,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

/// Error type for Redis operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Where a read-through result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
    Cache,
    Database,
}

impl RedisCache {
    /// Creates a new Redis client.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - Redis connection URL (e.g., "redis://localhost:6379")
    /// * `default_ttl` - Default time-to-live for cached entries
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Connection` if connection fails.
    pub async fn new(redis_url: &str, default_ttl: Duration) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn, default_ttl })
    }

    /// Default TTL configured for this client.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Gets a cached value by key.
    ///
    /// Returns `None` if the key doesn't exist, deserialization fails, or
    /// Redis is unreachable. Reads never fail a request.
    #[instrument(skip(self), fields(cache.operation = "GET"))]
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut conn = self.conn.clone();

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!(cache.key = %key, "Cache hit");
                match serde_json::from_str(&value) {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        error!(cache.key = %key, error = %e, "Failed to deserialize cached value");
                        None
                    }
                }
            }
            Ok(None) => {
                debug!(cache.key = %key, "Cache miss");
                None
            }
            Err(e) => {
                error!(cache.key = %key, error = %e, "Redis GET error");
                None
            }
        }
    }

    /// Sets a cached value with the default TTL.
    #[instrument(skip(self, value), fields(cache.operation = "SET"))]
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    /// Sets a cached value with a custom TTL.
    #[instrument(skip(self, value), fields(cache.operation = "SETEX"))]
    pub async fn set_with_ttl<T>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(value)?;

        conn.set_ex::<_, _, ()>(key, json, ttl.as_secs()).await?;

        debug!(cache.key = %key, cache.ttl_secs = %ttl.as_secs(), "Cache set");

        Ok(())
    }

    /// Gets a raw string value (session tokens, markers).
    ///
    /// Unlike [`get`](Self::get), connection errors are returned to the
    /// caller: the session registry and throttle must not silently degrade.
    #[instrument(skip(self), fields(cache.operation = "GET"))]
    pub async fn get_string(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        let value = conn.get::<_, Option<String>>(key).await?;
        Ok(value)
    }

    /// Sets a raw string value with a TTL.
    #[instrument(skip(self, value), fields(cache.operation = "SETEX"))]
    pub async fn set_string_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs()).await?;
        Ok(())
    }

    /// Deletes one or more keys.
    #[instrument(skip(self), fields(cache.operation = "DEL"))]
    pub async fn del(&self, keys: &[String]) -> Result<(), CacheError> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn.clone();
        conn.del::<_, ()>(keys).await?;

        debug!(cache.keys = ?keys, "Keys deleted");

        Ok(())
    }

    /// Invalidates (deletes) a single cached key.
    #[instrument(skip(self), fields(cache.operation = "DEL"))]
    pub async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(key).await?;

        debug!(cache.key = %key, "Cache invalidated");

        Ok(())
    }

    /// Checks if a key exists.
    #[instrument(skip(self), fields(cache.operation = "EXISTS"))]
    pub async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.conn.clone();
        let exists = conn.exists::<_, bool>(key).await?;
        Ok(exists)
    }

    /// Gets the remaining TTL for a key in seconds.
    ///
    /// Returns `None` if the key doesn't exist or has no TTL.
    #[instrument(skip(self), fields(cache.operation = "TTL"))]
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, CacheError> {
        let mut conn = self.conn.clone();
        let ttl = conn.ttl::<_, i64>(key).await?;

        // -1 means no expiry, -2 means the key doesn't exist
        Ok(if ttl > 0 { Some(ttl) } else { None })
    }

    /// Increments a counter key, returning the new value.
    #[instrument(skip(self), fields(cache.operation = "INCR"))]
    pub async fn incr(&self, key: &str) -> Result<i64, CacheError> {
        let mut conn = self.conn.clone();
        let value = conn.incr::<_, _, i64>(key, 1).await?;
        Ok(value)
    }

    /// Sets or refreshes the TTL on an existing key.
    #[instrument(skip(self), fields(cache.operation = "EXPIRE"))]
    pub async fn expire(&self, key: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.expire::<_, ()>(key, ttl.as_secs() as i64).await?;
        Ok(())
    }
}

/// Cache-aside read helper.
///
/// On a hit the cached value is returned with [`CacheSource::Cache`]. On a
/// miss the loader runs against the database; a `Some` result is written back
/// with the client's default TTL and returned with [`CacheSource::Database`],
/// while a `None` result is passed through without populating the cache.
///
/// With `cache` absent (Redis not configured or unreachable at startup) the
/// loader always runs; reads never depend on Redis availability.
pub async fn read_through<T, E, F, Fut>(
    cache: Option<&RedisCache>,
    key: &str,
    load: F,
) -> Result<Option<(T, CacheSource)>, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    if let Some(cache) = cache {
        if let Some(value) = cache.get::<T>(key).await {
            return Ok(Some((value, CacheSource::Cache)));
        }
    }

    let Some(value) = load().await? else {
        return Ok(None);
    };

    if let Some(cache) = cache {
        if let Err(e) = cache.set(key, &value).await {
            error!(cache.key = %key, error = %e, "Failed to populate cache after miss");
        }
    }

    Ok(Some((value, CacheSource::Database)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestData {
        id: i64,
        name: String,
    }

    // Integration tests require a running Redis instance

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn set_and_get_round_trip() {
        let cache = RedisCache::new("redis://localhost:6379", Duration::from_secs(60))
            .await
            .unwrap();

        let data = TestData {
            id: 1,
            name: "test".to_string(),
        };

        cache.set("test:key", &data).await.unwrap();

        let retrieved: Option<TestData> = cache.get("test:key").await;
        assert_eq!(retrieved, Some(data));

        cache.invalidate("test:key").await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn incr_and_expire_counter() {
        let cache = RedisCache::new("redis://localhost:6379", Duration::from_secs(60))
            .await
            .unwrap();

        cache.del(&["test:counter".to_string()]).await.unwrap();

        assert_eq!(cache.incr("test:counter").await.unwrap(), 1);
        assert_eq!(cache.incr("test:counter").await.unwrap(), 2);

        cache
            .expire("test:counter", Duration::from_secs(30))
            .await
            .unwrap();
        let ttl = cache.ttl("test:counter").await.unwrap();
        assert!(ttl.is_some_and(|t| t > 0 && t <= 30));

        cache.del(&["test:counter".to_string()]).await.unwrap();
    }

    #[tokio::test]
    async fn read_through_without_cache_runs_loader() {
        let result: Result<_, anyhow::Error> = read_through(None, "test:key", || async {
            Ok(Some(TestData {
                id: 7,
                name: "fresh".to_string(),
            }))
        })
        .await;

        let (value, source) = result.unwrap().unwrap();
        assert_eq!(value.id, 7);
        assert_eq!(source, CacheSource::Database);
    }

    #[tokio::test]
    async fn read_through_passes_loader_none_through() {
        let result: Result<Option<(TestData, _)>, anyhow::Error> =
            read_through(None, "test:key", || async { Ok(None) }).await;

        assert!(result.unwrap().is_none());
    }
}

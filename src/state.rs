use sqlx::PgPool;
use tracing::warn;

use relawan_auth::{JwtConfig, LoginThrottle, SessionStore};
use relawan_cache::{CacheConfig, RedisCache};

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::utils::errors::AppError;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    /// Cache-aside handle. Absent when Redis is unreachable at startup;
    /// reads then go straight to the database.
    pub cache: Option<RedisCache>,
    /// Session registry and login throttle. Unlike the cache these carry
    /// protocol state, so endpoints that need them fail with 500 when
    /// Redis is unavailable.
    pub sessions: Option<SessionStore>,
    pub throttle: Option<LoginThrottle>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn sessions(&self) -> Result<&SessionStore, AppError> {
        self.sessions
            .as_ref()
            .ok_or_else(|| AppError::internal(anyhow::anyhow!("Session store is unavailable")))
    }

    pub fn throttle(&self) -> Result<&LoginThrottle, AppError> {
        self.throttle
            .as_ref()
            .ok_or_else(|| AppError::internal(anyhow::anyhow!("Login throttle is unavailable")))
    }
}

pub async fn init_app_state() -> AppState {
    let jwt_config = JwtConfig::from_env();
    let cache_config = CacheConfig::from_env();

    let cache = match RedisCache::new(&cache_config.redis_url, cache_config.default_ttl()).await {
        Ok(cache) => Some(cache),
        Err(e) => {
            warn!(error = %e, "Redis unavailable, running without cache and sessions");
            None
        }
    };

    let sessions = cache
        .clone()
        .map(|cache| SessionStore::new(cache, jwt_config.session_ttl()));
    let throttle = cache.clone().map(LoginThrottle::new);

    AppState {
        db: init_db_pool().await,
        cache,
        sessions,
        throttle,
        jwt_config,
        cors_config: CorsConfig::from_env(),
    }
}

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use relawan::config::cors::CorsConfig;
use relawan::relawan_auth::{JwtConfig, LoginThrottle, SessionStore};
use relawan::relawan_cache::{CacheConfig, RedisCache};
use relawan::router::init_router;
use relawan::state::AppState;
use relawan::utils::password::hash_password;

/// App wired without Redis. Cached reads fall through to the database and
/// login endpoints are unavailable.
#[allow(dead_code)]
pub async fn setup_app(pool: PgPool) -> Router {
    dotenvy::dotenv().ok();
    init_router(AppState {
        db: pool,
        cache: None,
        sessions: None,
        throttle: None,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    })
}

/// App wired against a running Redis. Tests using this are marked ignored.
#[allow(dead_code)]
pub async fn setup_app_with_redis(pool: PgPool) -> Router {
    dotenvy::dotenv().ok();
    let jwt_config = JwtConfig::from_env();
    let cache_config = CacheConfig::from_env();

    let cache = RedisCache::new(&cache_config.redis_url, cache_config.default_ttl())
        .await
        .expect("Redis must be running for this test");

    init_router(AppState {
        db: pool,
        cache: Some(cache.clone()),
        sessions: Some(SessionStore::new(cache.clone(), jwt_config.session_ttl())),
        throttle: Some(LoginThrottle::new(cache)),
        jwt_config,
        cors_config: CorsConfig::from_env(),
    })
}

/// Same as [`setup_app_with_redis`] but with a custom lockout duration, so
/// a test can wait out the marker's TTL.
#[allow(dead_code)]
pub async fn setup_app_with_lockout(pool: PgPool, lockout: std::time::Duration) -> Router {
    dotenvy::dotenv().ok();
    let jwt_config = JwtConfig::from_env();
    let cache_config = CacheConfig::from_env();

    let cache = RedisCache::new(&cache_config.redis_url, cache_config.default_ttl())
        .await
        .expect("Redis must be running for this test");

    init_router(AppState {
        db: pool,
        cache: Some(cache.clone()),
        sessions: Some(SessionStore::new(cache.clone(), jwt_config.session_ttl())),
        throttle: Some(LoginThrottle::with_lockout(cache, lockout)),
        jwt_config,
        cors_config: CorsConfig::from_env(),
    })
}

pub fn unique_username(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{nanos}")
}

#[allow(dead_code)]
pub async fn create_test_user(pool: &PgPool, username: &str, password: &str) -> i64 {
    let hashed = hash_password(password).unwrap();

    sqlx::query_scalar::<_, i64>(
        r#"INSERT INTO users (name, username, email, password, phone, cv)
           VALUES ($1, $2, $3, $4, '081234567890', 'cv.pdf')
           RETURNING id"#,
    )
    .bind("Test User")
    .bind(username)
    .bind(format!("{username}@test.com"))
    .bind(hashed)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_employer(pool: &PgPool, username: &str, password: &str) -> i64 {
    let hashed = hash_password(password).unwrap();

    sqlx::query_scalar::<_, i64>(
        r#"INSERT INTO employers (name, username, email, password, phone)
           VALUES ($1, $2, $3, $4, '081234567890')
           RETURNING id"#,
    )
    .bind("Test Employer")
    .bind(username)
    .bind(format!("{username}@test.com"))
    .bind(hashed)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_admin(pool: &PgPool, username: &str, password: &str) -> i64 {
    let hashed = hash_password(password).unwrap();

    sqlx::query_scalar::<_, i64>(
        "INSERT INTO admins (username, password) VALUES ($1, $2) RETURNING id",
    )
    .bind(username)
    .bind(hashed)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_category(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_activity(pool: &PgPool, employer_id: i64, category_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"INSERT INTO activities
            (employer_id, category_id, name, location, duration, format,
             description, closing_date, start_date)
           VALUES ($1, $2, 'Beach Cleanup', 'Bali', '2 weeks', 'Offline',
                   'Help clean the beach', '2030-01-01', '2030-02-01')
           RETURNING id"#,
    )
    .bind(employer_id)
    .bind(category_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn authed_json_request(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Logs in through the given role prefix and returns the session token.
#[allow(dead_code)]
pub async fn get_auth_token(app: Router, role_prefix: &str, username: &str, password: &str) -> String {
    let request = json_request(
        "POST",
        &format!("/{role_prefix}/login"),
        serde_json::json!({"username": username, "password": password}),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    body["data"]["token"].as_str().unwrap().to_string()
}

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    authed_json_request, authed_request, create_test_activity, create_test_category,
    create_test_employer, create_test_user, get_auth_token, json_request, read_json, setup_app,
    setup_app_with_redis, unique_username,
};

#[sqlx::test(migrations = "./migrations")]
async fn register_creates_user(pool: PgPool) {
    let app = setup_app(pool).await;
    let username = unique_username("andi");

    let request = json_request(
        "POST",
        "/user/register",
        json!({
            "name": "Andi",
            "username": username,
            "email": format!("{username}@test.com"),
            "password": "Str0ngPass!",
            "phone": "081234567890"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = read_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], username.as_str());
    assert!(body["data"].get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn register_rejects_duplicate_username(pool: PgPool) {
    let username = unique_username("andi");
    create_test_user(&pool, &username, "Str0ngPass!").await;

    let app = setup_app(pool).await;
    let request = json_request(
        "POST",
        "/user/register",
        json!({
            "name": "Andi",
            "username": username,
            "email": format!("{username}@other.com"),
            "password": "Str0ngPass!",
            "phone": "081234567890"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Username is already taken");
}

#[sqlx::test(migrations = "./migrations")]
async fn register_rejects_weak_password(pool: PgPool) {
    let app = setup_app(pool).await;
    let username = unique_username("andi");

    let request = json_request(
        "POST",
        "/user/register",
        json!({
            "name": "Andi",
            "username": username,
            "email": format!("{username}@test.com"),
            "password": "alllowercase",
            "phone": "081234567890"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn register_rejects_bad_phone(pool: PgPool) {
    let app = setup_app(pool).await;
    let username = unique_username("andi");

    let request = json_request(
        "POST",
        "/user/register",
        json!({
            "name": "Andi",
            "username": username,
            "email": format!("{username}@test.com"),
            "password": "Str0ngPass!",
            "phone": "not-a-number"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn public_activity_list_works_without_cache(pool: PgPool) {
    let employer_id = create_test_employer(&pool, &unique_username("acme"), "Str0ngPass!").await;
    let category_id = create_test_category(&pool, &unique_username("Environment")).await;
    create_test_activity(&pool, employer_id, category_id).await;

    let app = setup_app(pool).await;
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/user/activities")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["message"], "Activities fetched");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Beach Cleanup");
    assert_eq!(body["data"][0]["employer_name"], "Test Employer");
}

#[sqlx::test(migrations = "./migrations")]
async fn public_activity_detail_includes_composition(pool: PgPool) {
    let employer_id = create_test_employer(&pool, &unique_username("acme"), "Str0ngPass!").await;
    let category_id = create_test_category(&pool, &unique_username("Environment")).await;
    let activity_id = create_test_activity(&pool, employer_id, category_id).await;

    let benefit_id =
        sqlx::query_scalar::<_, i64>("INSERT INTO benefits (name) VALUES ($1) RETURNING id")
            .bind(unique_username("Certificate"))
            .fetch_one(&pool)
            .await
            .unwrap();
    sqlx::query("INSERT INTO activity_benefits (activity_id, benefit_id) VALUES ($1, $2)")
        .bind(activity_id)
        .bind(benefit_id)
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_app(pool).await;
    let request = axum::http::Request::builder()
        .method("GET")
        .uri(format!("/user/activities/{activity_id}"))
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["data"]["description"], "Help clean the beach");
    assert_eq!(body["data"]["benefits"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["requirements"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn missing_activity_is_404(pool: PgPool) {
    let app = setup_app(pool).await;
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/user/activities/999999")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn profile_requires_token(pool: PgPool) {
    let app = setup_app(pool).await;
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/user/profile")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn logout_without_token_is_400(pool: PgPool) {
    let app = setup_app(pool).await;
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/user/logout")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert_eq!(body["message"], "Missing token");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Redis"]
async fn profile_update_enforces_ownership(pool: PgPool) {
    let username = unique_username("andi");
    let user_id = create_test_user(&pool, &username, "Str0ngPass!").await;
    let other_id = create_test_user(&pool, &unique_username("budi"), "Str0ngPass!").await;

    let app = setup_app_with_redis(pool).await;
    let token = get_auth_token(app.clone(), "user", &username, "Str0ngPass!").await;

    let request = authed_json_request(
        "PUT",
        &format!("/user/profile/{other_id}"),
        &token,
        json!({"name": "Hijacked"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let request = authed_json_request(
        "PUT",
        &format!("/user/profile/{user_id}"),
        &token,
        json!({"name": "Renamed", "summary": "Volunteer at heart"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["data"]["name"], "Renamed");
    assert_eq!(body["data"]["summary"], "Volunteer at heart");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Redis"]
async fn application_lifecycle(pool: PgPool) {
    let username = unique_username("andi");
    let user_id = create_test_user(&pool, &username, "Str0ngPass!").await;
    let employer_id = create_test_employer(&pool, &unique_username("acme"), "Str0ngPass!").await;
    let category_id = create_test_category(&pool, &unique_username("Environment")).await;
    let activity_id = create_test_activity(&pool, employer_id, category_id).await;

    let app = setup_app_with_redis(pool.clone()).await;
    let token = get_auth_token(app.clone(), "user", &username, "Str0ngPass!").await;

    let request = authed_json_request(
        "POST",
        &format!("/user/apply/{user_id}/{activity_id}"),
        &token,
        json!({"motivation": "I care about the environment"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // applying twice to the same activity is rejected
    let request = authed_json_request(
        "POST",
        &format!("/user/apply/{user_id}/{activity_id}"),
        &token,
        json!({"motivation": "Again"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert_eq!(body["message"], "You have already applied to this activity");

    let status = sqlx::query_scalar::<_, String>(
        "SELECT status FROM applications WHERE user_id = $1 AND activity_id = $2",
    )
    .bind(user_id)
    .bind(activity_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(status, "In-review");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Redis"]
async fn apply_without_cv_is_rejected(pool: PgPool) {
    let username = unique_username("andi");
    let user_id = create_test_user(&pool, &username, "Str0ngPass!").await;
    sqlx::query("UPDATE users SET cv = NULL WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let employer_id = create_test_employer(&pool, &unique_username("acme"), "Str0ngPass!").await;
    let category_id = create_test_category(&pool, &unique_username("Environment")).await;
    let activity_id = create_test_activity(&pool, employer_id, category_id).await;

    let app = setup_app_with_redis(pool).await;
    let token = get_auth_token(app.clone(), "user", &username, "Str0ngPass!").await;

    let request = authed_json_request(
        "POST",
        &format!("/user/apply/{user_id}/{activity_id}"),
        &token,
        json!({"motivation": "No CV yet"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert_eq!(body["message"], "Upload your CV before applying");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Redis"]
async fn skill_removal_cleans_orphaned_lookup_rows(pool: PgPool) {
    let username = unique_username("andi");
    let user_id = create_test_user(&pool, &username, "Str0ngPass!").await;

    let app = setup_app_with_redis(pool.clone()).await;
    let token = get_auth_token(app.clone(), "user", &username, "Str0ngPass!").await;

    let skill_name = unique_username("Rust");
    let request = authed_json_request(
        "POST",
        &format!("/user/skills/{user_id}"),
        &token,
        json!({"name": skill_name}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = read_json(response).await;
    let skill_id = body["data"]["id"].as_i64().unwrap();

    let request = authed_request(
        "DELETE",
        &format!("/user/skills/{user_id}/{skill_id}"),
        &token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // nobody holds the skill anymore, so the lookup row is gone too
    let remaining = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM skills WHERE id = $1")
        .bind(skill_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    authed_json_request, authed_request, create_test_activity, create_test_admin,
    create_test_category, create_test_employer, create_test_user, get_auth_token, read_json,
    setup_app, setup_app_with_redis, unique_username,
};

use relawan::cli::create_admin;

#[sqlx::test(migrations = "./migrations")]
async fn create_admin_bootstrap(pool: PgPool) {
    let username = unique_username("root");

    create_admin(&pool, &username, "Str0ngPass!").await.unwrap();

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins WHERE username = $1")
        .bind(&username)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    // hashes are stored, never the raw password
    let stored = sqlx::query_scalar::<_, String>("SELECT password FROM admins WHERE username = $1")
        .bind(&username)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_ne!(stored, "Str0ngPass!");

    let err = create_admin(&pool, &username, "Other1Pass!").await.unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[sqlx::test(migrations = "./migrations")]
async fn admin_routes_require_auth(pool: PgPool) {
    let app = setup_app(pool).await;

    for uri in ["/admin/users", "/admin/employers", "/admin/categories"] {
        let request = axum::http::Request::builder()
            .method("GET")
            .uri(uri)
            .body(axum::body::Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Redis"]
async fn admin_oversees_users_and_employers(pool: PgPool) {
    let admin_username = unique_username("root");
    create_test_admin(&pool, &admin_username, "Str0ngPass!").await;
    let user_id = create_test_user(&pool, &unique_username("andi"), "Str0ngPass!").await;
    create_test_employer(&pool, &unique_username("acme"), "Str0ngPass!").await;

    let app = setup_app_with_redis(pool).await;
    let token = get_auth_token(app.clone(), "admin", &admin_username, "Str0ngPass!").await;

    let response = app
        .clone()
        .oneshot(authed_request("GET", "/admin/users", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(authed_request("GET", &format!("/admin/users/{user_id}"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert!(body["data"]["skills"].as_array().unwrap().is_empty());

    let response = app
        .clone()
        .oneshot(authed_request("GET", "/admin/employers", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // unknown ids are a 404, not an empty view
    let response = app
        .oneshot(authed_request("GET", "/admin/users/999999", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Redis"]
async fn category_crud(pool: PgPool) {
    let admin_username = unique_username("root");
    create_test_admin(&pool, &admin_username, "Str0ngPass!").await;

    let app = setup_app_with_redis(pool.clone()).await;
    let token = get_auth_token(app.clone(), "admin", &admin_username, "Str0ngPass!").await;

    let name = unique_username("Environment");
    let request = authed_json_request("POST", "/admin/categories", &token, json!({"name": name}));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = read_json(response).await;
    let category_id = body["data"]["id"].as_i64().unwrap();

    // duplicates are refused
    let request = authed_json_request("POST", "/admin/categories", &token, json!({"name": name}));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let renamed = unique_username("Education");
    let request = authed_json_request(
        "PUT",
        &format!("/admin/categories/{category_id}"),
        &token,
        json!({"name": renamed}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["data"]["name"], renamed.as_str());

    // a category referenced by an activity cannot be deleted
    let employer_id = create_test_employer(&pool, &unique_username("acme"), "Str0ngPass!").await;
    create_test_activity(&pool, employer_id, category_id).await;

    let request = authed_request("DELETE", &format!("/admin/categories/{category_id}"), &token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let spare = create_test_category(&pool, &unique_username("Health")).await;
    let request = authed_request("DELETE", &format!("/admin/categories/{spare}"), &token);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Redis"]
async fn admin_profile_update_enforces_ownership(pool: PgPool) {
    let admin_username = unique_username("root");
    let admin_id = create_test_admin(&pool, &admin_username, "Str0ngPass!").await;
    let other_id = create_test_admin(&pool, &unique_username("root2"), "Str0ngPass!").await;

    let app = setup_app_with_redis(pool).await;
    let token = get_auth_token(app.clone(), "admin", &admin_username, "Str0ngPass!").await;

    let request = authed_json_request(
        "PUT",
        &format!("/admin/profile/{other_id}"),
        &token,
        json!({"name": "Hijacked"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let request = authed_json_request(
        "PUT",
        &format!("/admin/profile/{admin_id}"),
        &token,
        json!({"name": "Site Admin", "email": "admin@relawan.test"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["data"]["name"], "Site Admin");
    assert_eq!(body["data"]["email"], "admin@relawan.test");
}

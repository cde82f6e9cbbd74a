use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{
    create_category, delete_category, employer_detail, list_categories, list_employers,
    list_users, login, logout, profile, update_category, update_profile, user_detail,
};

pub fn init_admins_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/profile", get(profile))
        .route("/profile/{admin_id}", put(update_profile))
        .route("/users", get(list_users))
        .route("/users/{user_id}", get(user_detail))
        .route("/employers", get(list_employers))
        .route("/employers/{employer_id}", get(employer_detail))
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{category_id}",
            put(update_category).delete(delete_category),
        )
}

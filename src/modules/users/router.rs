use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use super::controller::{
    activity_detail, add_experience, add_skill, apply, list_activities, login, logout, profile,
    register, remove_experience, remove_skill, update_profile,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", post(logout))
        .route("/activities", get(list_activities))
        .route("/activities/{activity_id}", get(activity_detail))
        .route("/profile", get(profile))
        .route("/profile/{user_id}", put(update_profile))
        .route("/apply/{user_id}/{activity_id}", post(apply))
        .route("/skills/{user_id}", post(add_skill))
        .route("/skills/{user_id}/{skill_id}", delete(remove_skill))
        .route("/experiences/{user_id}", post(add_experience))
        .route(
            "/experiences/{user_id}/{experience_id}",
            delete(remove_experience),
        )
}

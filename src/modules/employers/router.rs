use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use super::controller::{
    activity_detail, add_benefit, add_requirement, applicant_detail, create_activity,
    delete_activity, list_activities, list_applicants, login, logout, profile, register,
    remove_benefit, remove_requirement, schedule_interview, update_activity,
    update_applicant_status, update_profile,
};

pub fn init_employers_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", post(logout))
        .route("/profile", get(profile))
        .route("/profile/{employer_id}", put(update_profile))
        .route(
            "/activities/{employer_id}",
            get(list_activities).post(create_activity),
        )
        .route(
            "/activities/{employer_id}/{activity_id}",
            get(activity_detail)
                .put(update_activity)
                .delete(delete_activity),
        )
        .route(
            "/activities/{employer_id}/{activity_id}/benefits",
            post(add_benefit),
        )
        .route(
            "/activities/{employer_id}/{activity_id}/benefits/{benefit_id}",
            delete(remove_benefit),
        )
        .route(
            "/activities/{employer_id}/{activity_id}/requirements",
            post(add_requirement),
        )
        .route(
            "/activities/{employer_id}/{activity_id}/requirements/{requirement_id}",
            delete(remove_requirement),
        )
        .route("/applicants/{employer_id}", get(list_applicants))
        .route("/applicants/{employer_id}/{user_id}", get(applicant_detail))
        .route(
            "/applicants/{employer_id}/{application_id}/status",
            put(update_applicant_status),
        )
        .route(
            "/applicants/{employer_id}/{application_id}/interview",
            put(schedule_interview),
        )
}

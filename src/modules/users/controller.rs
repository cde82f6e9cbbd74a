use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::instrument;

use relawan_auth::Role;

use crate::middleware::auth::{UserAuth, bearer_from_headers};
use crate::modules::auth::model::{LoginDto, SessionData};
use crate::modules::auth::service::AuthService;
use crate::modules::users::model::{
    ActivityDetailView, ActivitySummary, AddExperienceDto, AddSkillDto, ApplyDto, Experience,
    RegisterUserDto, Skill, UpdateUserDto, UserProfile, UserProfileView,
};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/user/login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = SessionData),
        (status = 401, description = "Invalid credentials, with attempts_left"),
        (status = 429, description = "Locked out, with retry_after_seconds")
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginDto>,
) -> Result<Response, AppError> {
    let sessions = state.sessions()?;
    let throttle = state.throttle()?;

    let principal = UserService::find_principal(&state.db, &dto.username).await?;
    let outcome = AuthService::login(
        sessions,
        throttle,
        &state.jwt_config,
        Role::User,
        &dto.username,
        principal,
        &dto.password,
    )
    .await?;

    Ok(axum::response::IntoResponse::into_response(outcome))
}

#[utoipa::path(
    post,
    path = "/user/register",
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<UserProfile>),
        (status = 400, description = "Username already taken"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterUserDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), AppError> {
    let user = UserService::register(&state.db, state.cache.as_ref(), dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Registration successful", user)),
    ))
}

#[utoipa::path(
    post,
    path = "/user/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 400, description = "Missing or invalid token")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let token = bearer_from_headers(&headers)
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Missing token")))?;

    AuthService::logout(state.sessions()?, &state.jwt_config, Role::User, token).await?;

    Ok(Json(ApiResponse::message("Logout successful")))
}

#[utoipa::path(
    get,
    path = "/user/activities",
    responses(
        (status = 200, description = "Open activities", body = ApiResponse<Vec<ActivitySummary>>)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn list_activities(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ActivitySummary>>>, AppError> {
    let (activities, source) =
        UserService::public_activities(&state.db, state.cache.as_ref()).await?;

    Ok(Json(ApiResponse::from_source(
        "Activities fetched",
        activities,
        source,
    )))
}

#[utoipa::path(
    get,
    path = "/user/activities/{activity_id}",
    params(("activity_id" = i64, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity detail", body = ApiResponse<ActivityDetailView>),
        (status = 404, description = "Activity not found")
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn activity_detail(
    State(state): State<AppState>,
    Path(activity_id): Path<i64>,
) -> Result<Json<ApiResponse<ActivityDetailView>>, AppError> {
    let (detail, source) =
        UserService::public_activity_detail(&state.db, state.cache.as_ref(), activity_id).await?;

    Ok(Json(ApiResponse::from_source(
        "Activity fetched",
        detail,
        source,
    )))
}

#[utoipa::path(
    get,
    path = "/user/profile",
    responses(
        (status = 200, description = "Profile", body = ApiResponse<UserProfileView>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn profile(
    State(state): State<AppState>,
    UserAuth(auth): UserAuth,
) -> Result<Json<ApiResponse<UserProfileView>>, AppError> {
    let (profile, source) = UserService::profile(&state.db, state.cache.as_ref(), auth.id).await?;

    Ok(Json(ApiResponse::from_source(
        "Profile fetched",
        profile,
        source,
    )))
}

#[utoipa::path(
    put,
    path = "/user/profile/{user_id}",
    params(("user_id" = i64, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserProfile>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    UserAuth(auth): UserAuth,
    Path(user_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    auth.require_owner(user_id)?;

    let user = UserService::update_profile(&state.db, state.cache.as_ref(), user_id, dto).await?;

    Ok(Json(ApiResponse::ok("Profile updated", user)))
}

#[utoipa::path(
    post,
    path = "/user/apply/{user_id}/{activity_id}",
    params(
        ("user_id" = i64, Path, description = "User ID"),
        ("activity_id" = i64, Path, description = "Activity ID")
    ),
    request_body = ApplyDto,
    responses(
        (status = 201, description = "Application submitted"),
        (status = 400, description = "Missing CV or duplicate application"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Activity not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, dto))]
pub async fn apply(
    State(state): State<AppState>,
    UserAuth(auth): UserAuth,
    Path((user_id, activity_id)): Path<(i64, i64)>,
    ValidatedJson(dto): ValidatedJson<ApplyDto>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    auth.require_owner(user_id)?;

    UserService::apply(&state.db, state.cache.as_ref(), user_id, activity_id, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message("Application submitted")),
    ))
}

#[utoipa::path(
    post,
    path = "/user/skills/{user_id}",
    params(("user_id" = i64, Path, description = "User ID")),
    request_body = AddSkillDto,
    responses(
        (status = 201, description = "Skill added", body = ApiResponse<Skill>),
        (status = 403, description = "Not the owner")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, dto))]
pub async fn add_skill(
    State(state): State<AppState>,
    UserAuth(auth): UserAuth,
    Path(user_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<AddSkillDto>,
) -> Result<(StatusCode, Json<ApiResponse<Skill>>), AppError> {
    auth.require_owner(user_id)?;

    let skill = UserService::add_skill(&state.db, state.cache.as_ref(), user_id, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Skill added", skill)),
    ))
}

#[utoipa::path(
    delete,
    path = "/user/skills/{user_id}/{skill_id}",
    params(
        ("user_id" = i64, Path, description = "User ID"),
        ("skill_id" = i64, Path, description = "Skill ID")
    ),
    responses(
        (status = 200, description = "Skill removed"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Skill not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn remove_skill(
    State(state): State<AppState>,
    UserAuth(auth): UserAuth,
    Path((user_id, skill_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    auth.require_owner(user_id)?;

    UserService::remove_skill(&state.db, state.cache.as_ref(), user_id, skill_id).await?;

    Ok(Json(ApiResponse::message("Skill removed")))
}

#[utoipa::path(
    post,
    path = "/user/experiences/{user_id}",
    params(("user_id" = i64, Path, description = "User ID")),
    request_body = AddExperienceDto,
    responses(
        (status = 201, description = "Experience added", body = ApiResponse<Experience>),
        (status = 403, description = "Not the owner")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, dto))]
pub async fn add_experience(
    State(state): State<AppState>,
    UserAuth(auth): UserAuth,
    Path(user_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<AddExperienceDto>,
) -> Result<(StatusCode, Json<ApiResponse<Experience>>), AppError> {
    auth.require_owner(user_id)?;

    let experience =
        UserService::add_experience(&state.db, state.cache.as_ref(), user_id, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Experience added", experience)),
    ))
}

#[utoipa::path(
    delete,
    path = "/user/experiences/{user_id}/{experience_id}",
    params(
        ("user_id" = i64, Path, description = "User ID"),
        ("experience_id" = i64, Path, description = "Experience ID")
    ),
    responses(
        (status = 200, description = "Experience removed"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Experience not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn remove_experience(
    State(state): State<AppState>,
    UserAuth(auth): UserAuth,
    Path((user_id, experience_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    auth.require_owner(user_id)?;

    UserService::remove_experience(&state.db, state.cache.as_ref(), user_id, experience_id)
        .await?;

    Ok(Json(ApiResponse::message("Experience removed")))
}

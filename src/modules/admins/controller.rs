use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::instrument;

use relawan_auth::Role;

use crate::middleware::auth::{AdminAuth, bearer_from_headers};
use crate::modules::admins::model::{AdminProfile, Category, CategoryDto, UpdateAdminDto};
use crate::modules::admins::service::AdminService;
use crate::modules::auth::model::{LoginDto, SessionData};
use crate::modules::auth::service::AuthService;
use crate::modules::employers::model::EmployerProfile;
use crate::modules::users::model::{UserProfile, UserProfileView};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/admin/login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = SessionData),
        (status = 401, description = "Invalid credentials, with attempts_left"),
        (status = 429, description = "Locked out, with retry_after_seconds")
    ),
    tag = "Admins"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginDto>,
) -> Result<Response, AppError> {
    let sessions = state.sessions()?;
    let throttle = state.throttle()?;

    let principal = AdminService::find_principal(&state.db, &dto.username).await?;
    let outcome = AuthService::login(
        sessions,
        throttle,
        &state.jwt_config,
        Role::Admin,
        &dto.username,
        principal,
        &dto.password,
    )
    .await?;

    Ok(axum::response::IntoResponse::into_response(outcome))
}

#[utoipa::path(
    post,
    path = "/admin/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 400, description = "Missing or invalid token")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let token = bearer_from_headers(&headers)
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Missing token")))?;

    AuthService::logout(state.sessions()?, &state.jwt_config, Role::Admin, token).await?;

    Ok(Json(ApiResponse::message("Logout successful")))
}

#[utoipa::path(
    get,
    path = "/admin/profile",
    responses(
        (status = 200, description = "Profile", body = ApiResponse<AdminProfile>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn profile(
    State(state): State<AppState>,
    AdminAuth(auth): AdminAuth,
) -> Result<Json<ApiResponse<AdminProfile>>, AppError> {
    let (profile, source) = AdminService::profile(&state.db, state.cache.as_ref(), auth.id).await?;

    Ok(Json(ApiResponse::from_source(
        "Profile fetched",
        profile,
        source,
    )))
}

#[utoipa::path(
    put,
    path = "/admin/profile/{admin_id}",
    params(("admin_id" = i64, Path, description = "Admin ID")),
    request_body = UpdateAdminDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<AdminProfile>),
        (status = 403, description = "Not the owner")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    AdminAuth(auth): AdminAuth,
    Path(admin_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateAdminDto>,
) -> Result<Json<ApiResponse<AdminProfile>>, AppError> {
    auth.require_owner(admin_id)?;

    let admin =
        AdminService::update_profile(&state.db, state.cache.as_ref(), admin_id, dto).await?;

    Ok(Json(ApiResponse::ok("Profile updated", admin)))
}

#[utoipa::path(
    get,
    path = "/admin/users",
    responses(
        (status = 200, description = "All users", body = ApiResponse<Vec<UserProfile>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth))]
pub async fn list_users(
    State(state): State<AppState>,
    AdminAuth(_auth): AdminAuth,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, AppError> {
    let (users, source) = AdminService::users(&state.db, state.cache.as_ref()).await?;

    Ok(Json(ApiResponse::from_source("Users fetched", users, source)))
}

#[utoipa::path(
    get,
    path = "/admin/users/{user_id}",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User detail", body = ApiResponse<UserProfileView>),
        (status = 404, description = "User not found")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth))]
pub async fn user_detail(
    State(state): State<AppState>,
    AdminAuth(_auth): AdminAuth,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<UserProfileView>>, AppError> {
    let (user, source) =
        AdminService::user_detail(&state.db, state.cache.as_ref(), user_id).await?;

    Ok(Json(ApiResponse::from_source("User fetched", user, source)))
}

#[utoipa::path(
    get,
    path = "/admin/employers",
    responses(
        (status = 200, description = "All employers", body = ApiResponse<Vec<EmployerProfile>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth))]
pub async fn list_employers(
    State(state): State<AppState>,
    AdminAuth(_auth): AdminAuth,
) -> Result<Json<ApiResponse<Vec<EmployerProfile>>>, AppError> {
    let (employers, source) = AdminService::employers(&state.db, state.cache.as_ref()).await?;

    Ok(Json(ApiResponse::from_source(
        "Employers fetched",
        employers,
        source,
    )))
}

#[utoipa::path(
    get,
    path = "/admin/employers/{employer_id}",
    params(("employer_id" = i64, Path, description = "Employer ID")),
    responses(
        (status = 200, description = "Employer detail", body = ApiResponse<EmployerProfile>),
        (status = 404, description = "Employer not found")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth))]
pub async fn employer_detail(
    State(state): State<AppState>,
    AdminAuth(_auth): AdminAuth,
    Path(employer_id): Path<i64>,
) -> Result<Json<ApiResponse<EmployerProfile>>, AppError> {
    let (employer, source) =
        AdminService::employer_detail(&state.db, state.cache.as_ref(), employer_id).await?;

    Ok(Json(ApiResponse::from_source(
        "Employer fetched",
        employer,
        source,
    )))
}

#[utoipa::path(
    get,
    path = "/admin/categories",
    responses(
        (status = 200, description = "All categories", body = ApiResponse<Vec<Category>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth))]
pub async fn list_categories(
    State(state): State<AppState>,
    AdminAuth(_auth): AdminAuth,
) -> Result<Json<ApiResponse<Vec<Category>>>, AppError> {
    let (categories, source) = AdminService::categories(&state.db, state.cache.as_ref()).await?;

    Ok(Json(ApiResponse::from_source(
        "Categories fetched",
        categories,
        source,
    )))
}

#[utoipa::path(
    post,
    path = "/admin/categories",
    request_body = CategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<Category>),
        (status = 400, description = "Category already exists")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth, dto))]
pub async fn create_category(
    State(state): State<AppState>,
    AdminAuth(_auth): AdminAuth,
    ValidatedJson(dto): ValidatedJson<CategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), AppError> {
    let category = AdminService::create_category(&state.db, state.cache.as_ref(), dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Category created", category)),
    ))
}

#[utoipa::path(
    put,
    path = "/admin/categories/{category_id}",
    params(("category_id" = i64, Path, description = "Category ID")),
    request_body = CategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<Category>),
        (status = 404, description = "Category not found")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth, dto))]
pub async fn update_category(
    State(state): State<AppState>,
    AdminAuth(_auth): AdminAuth,
    Path(category_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<CategoryDto>,
) -> Result<Json<ApiResponse<Category>>, AppError> {
    let category =
        AdminService::update_category(&state.db, state.cache.as_ref(), category_id, dto).await?;

    Ok(Json(ApiResponse::ok("Category updated", category)))
}

#[utoipa::path(
    delete,
    path = "/admin/categories/{category_id}",
    params(("category_id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 400, description = "Category still in use"),
        (status = 404, description = "Category not found")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth))]
pub async fn delete_category(
    State(state): State<AppState>,
    AdminAuth(_auth): AdminAuth,
    Path(category_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    AdminService::delete_category(&state.db, state.cache.as_ref(), category_id).await?;

    Ok(Json(ApiResponse::message("Category deleted")))
}

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::instrument;

use relawan_auth::Role;

use crate::middleware::auth::{EmployerAuth, bearer_from_headers};
use crate::modules::auth::model::{LoginDto, SessionData};
use crate::modules::auth::service::AuthService;
use crate::modules::employers::model::{
    Activity, ActivityListItem, ApplicantDetailView, ApplicantSummary, AttachItemDto,
    CreateActivityDto, EmployerActivityView, EmployerProfile, RegisterEmployerDto,
    ScheduleInterviewDto, UpdateActivityDto, UpdateApplicantStatusDto, UpdateEmployerDto,
};
use crate::modules::employers::service::EmployerService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/employer/login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = SessionData),
        (status = 401, description = "Invalid credentials, with attempts_left"),
        (status = 429, description = "Locked out, with retry_after_seconds")
    ),
    tag = "Employers"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginDto>,
) -> Result<Response, AppError> {
    let sessions = state.sessions()?;
    let throttle = state.throttle()?;

    let principal = EmployerService::find_principal(&state.db, &dto.username).await?;
    let outcome = AuthService::login(
        sessions,
        throttle,
        &state.jwt_config,
        Role::Employer,
        &dto.username,
        principal,
        &dto.password,
    )
    .await?;

    Ok(axum::response::IntoResponse::into_response(outcome))
}

#[utoipa::path(
    post,
    path = "/employer/register",
    request_body = RegisterEmployerDto,
    responses(
        (status = 201, description = "Employer registered", body = ApiResponse<EmployerProfile>),
        (status = 400, description = "Username already taken"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Employers"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterEmployerDto>,
) -> Result<(StatusCode, Json<ApiResponse<EmployerProfile>>), AppError> {
    let employer = EmployerService::register(&state.db, state.cache.as_ref(), dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Registration successful", employer)),
    ))
}

#[utoipa::path(
    post,
    path = "/employer/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 400, description = "Missing or invalid token")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let token = bearer_from_headers(&headers)
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Missing token")))?;

    AuthService::logout(state.sessions()?, &state.jwt_config, Role::Employer, token).await?;

    Ok(Json(ApiResponse::message("Logout successful")))
}

#[utoipa::path(
    get,
    path = "/employer/profile",
    responses(
        (status = 200, description = "Profile", body = ApiResponse<EmployerProfile>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn profile(
    State(state): State<AppState>,
    EmployerAuth(auth): EmployerAuth,
) -> Result<Json<ApiResponse<EmployerProfile>>, AppError> {
    let (profile, source) =
        EmployerService::profile(&state.db, state.cache.as_ref(), auth.id).await?;

    Ok(Json(ApiResponse::from_source(
        "Profile fetched",
        profile,
        source,
    )))
}

#[utoipa::path(
    put,
    path = "/employer/profile/{employer_id}",
    params(("employer_id" = i64, Path, description = "Employer ID")),
    request_body = UpdateEmployerDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<EmployerProfile>),
        (status = 403, description = "Not the owner")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    EmployerAuth(auth): EmployerAuth,
    Path(employer_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateEmployerDto>,
) -> Result<Json<ApiResponse<EmployerProfile>>, AppError> {
    auth.require_owner(employer_id)?;

    let employer =
        EmployerService::update_profile(&state.db, state.cache.as_ref(), employer_id, dto).await?;

    Ok(Json(ApiResponse::ok("Profile updated", employer)))
}

#[utoipa::path(
    get,
    path = "/employer/activities/{employer_id}",
    params(("employer_id" = i64, Path, description = "Employer ID")),
    responses(
        (status = 200, description = "Activities", body = ApiResponse<Vec<ActivityListItem>>),
        (status = 403, description = "Not the owner")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn list_activities(
    State(state): State<AppState>,
    EmployerAuth(auth): EmployerAuth,
    Path(employer_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<ActivityListItem>>>, AppError> {
    auth.require_owner(employer_id)?;

    let (activities, source) =
        EmployerService::activities(&state.db, state.cache.as_ref(), employer_id).await?;

    Ok(Json(ApiResponse::from_source(
        "Activities fetched",
        activities,
        source,
    )))
}

#[utoipa::path(
    get,
    path = "/employer/activities/{employer_id}/{activity_id}",
    params(
        ("employer_id" = i64, Path, description = "Employer ID"),
        ("activity_id" = i64, Path, description = "Activity ID")
    ),
    responses(
        (status = 200, description = "Activity detail", body = ApiResponse<EmployerActivityView>),
        (status = 404, description = "Activity not found")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn activity_detail(
    State(state): State<AppState>,
    EmployerAuth(auth): EmployerAuth,
    Path((employer_id, activity_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<EmployerActivityView>>, AppError> {
    auth.require_owner(employer_id)?;

    let (detail, source) =
        EmployerService::activity_detail(&state.db, state.cache.as_ref(), employer_id, activity_id)
            .await?;

    Ok(Json(ApiResponse::from_source(
        "Activity fetched",
        detail,
        source,
    )))
}

#[utoipa::path(
    post,
    path = "/employer/activities/{employer_id}",
    params(("employer_id" = i64, Path, description = "Employer ID")),
    request_body = CreateActivityDto,
    responses(
        (status = 201, description = "Activity created", body = ApiResponse<Activity>),
        (status = 400, description = "Category does not exist"),
        (status = 403, description = "Not the owner")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, dto))]
pub async fn create_activity(
    State(state): State<AppState>,
    EmployerAuth(auth): EmployerAuth,
    Path(employer_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<CreateActivityDto>,
) -> Result<(StatusCode, Json<ApiResponse<Activity>>), AppError> {
    auth.require_owner(employer_id)?;

    let activity =
        EmployerService::create_activity(&state.db, state.cache.as_ref(), employer_id, dto)
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Activity created", activity)),
    ))
}

#[utoipa::path(
    put,
    path = "/employer/activities/{employer_id}/{activity_id}",
    params(
        ("employer_id" = i64, Path, description = "Employer ID"),
        ("activity_id" = i64, Path, description = "Activity ID")
    ),
    request_body = UpdateActivityDto,
    responses(
        (status = 200, description = "Activity updated", body = ApiResponse<Activity>),
        (status = 404, description = "Activity not found")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, dto))]
pub async fn update_activity(
    State(state): State<AppState>,
    EmployerAuth(auth): EmployerAuth,
    Path((employer_id, activity_id)): Path<(i64, i64)>,
    ValidatedJson(dto): ValidatedJson<UpdateActivityDto>,
) -> Result<Json<ApiResponse<Activity>>, AppError> {
    auth.require_owner(employer_id)?;

    let activity = EmployerService::update_activity(
        &state.db,
        state.cache.as_ref(),
        employer_id,
        activity_id,
        dto,
    )
    .await?;

    Ok(Json(ApiResponse::ok("Activity updated", activity)))
}

#[utoipa::path(
    delete,
    path = "/employer/activities/{employer_id}/{activity_id}",
    params(
        ("employer_id" = i64, Path, description = "Employer ID"),
        ("activity_id" = i64, Path, description = "Activity ID")
    ),
    responses(
        (status = 200, description = "Activity deleted"),
        (status = 404, description = "Activity not found")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn delete_activity(
    State(state): State<AppState>,
    EmployerAuth(auth): EmployerAuth,
    Path((employer_id, activity_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    auth.require_owner(employer_id)?;

    EmployerService::delete_activity(&state.db, state.cache.as_ref(), employer_id, activity_id)
        .await?;

    Ok(Json(ApiResponse::message("Activity deleted")))
}

#[utoipa::path(
    post,
    path = "/employer/activities/{employer_id}/{activity_id}/benefits",
    params(
        ("employer_id" = i64, Path, description = "Employer ID"),
        ("activity_id" = i64, Path, description = "Activity ID")
    ),
    request_body = AttachItemDto,
    responses(
        (status = 201, description = "Benefit attached"),
        (status = 404, description = "Activity not found")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, dto))]
pub async fn add_benefit(
    State(state): State<AppState>,
    EmployerAuth(auth): EmployerAuth,
    Path((employer_id, activity_id)): Path<(i64, i64)>,
    ValidatedJson(dto): ValidatedJson<AttachItemDto>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    auth.require_owner(employer_id)?;

    EmployerService::add_benefit(&state.db, state.cache.as_ref(), employer_id, activity_id, dto)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message("Benefit attached")),
    ))
}

#[utoipa::path(
    delete,
    path = "/employer/activities/{employer_id}/{activity_id}/benefits/{benefit_id}",
    params(
        ("employer_id" = i64, Path, description = "Employer ID"),
        ("activity_id" = i64, Path, description = "Activity ID"),
        ("benefit_id" = i64, Path, description = "Benefit ID")
    ),
    responses(
        (status = 200, description = "Benefit detached"),
        (status = 404, description = "Benefit not found")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn remove_benefit(
    State(state): State<AppState>,
    EmployerAuth(auth): EmployerAuth,
    Path((employer_id, activity_id, benefit_id)): Path<(i64, i64, i64)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    auth.require_owner(employer_id)?;

    EmployerService::remove_benefit(
        &state.db,
        state.cache.as_ref(),
        employer_id,
        activity_id,
        benefit_id,
    )
    .await?;

    Ok(Json(ApiResponse::message("Benefit detached")))
}

#[utoipa::path(
    post,
    path = "/employer/activities/{employer_id}/{activity_id}/requirements",
    params(
        ("employer_id" = i64, Path, description = "Employer ID"),
        ("activity_id" = i64, Path, description = "Activity ID")
    ),
    request_body = AttachItemDto,
    responses(
        (status = 201, description = "Requirement attached"),
        (status = 404, description = "Activity not found")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, dto))]
pub async fn add_requirement(
    State(state): State<AppState>,
    EmployerAuth(auth): EmployerAuth,
    Path((employer_id, activity_id)): Path<(i64, i64)>,
    ValidatedJson(dto): ValidatedJson<AttachItemDto>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    auth.require_owner(employer_id)?;

    EmployerService::add_requirement(
        &state.db,
        state.cache.as_ref(),
        employer_id,
        activity_id,
        dto,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message("Requirement attached")),
    ))
}

#[utoipa::path(
    delete,
    path = "/employer/activities/{employer_id}/{activity_id}/requirements/{requirement_id}",
    params(
        ("employer_id" = i64, Path, description = "Employer ID"),
        ("activity_id" = i64, Path, description = "Activity ID"),
        ("requirement_id" = i64, Path, description = "Requirement ID")
    ),
    responses(
        (status = 200, description = "Requirement detached"),
        (status = 404, description = "Requirement not found")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn remove_requirement(
    State(state): State<AppState>,
    EmployerAuth(auth): EmployerAuth,
    Path((employer_id, activity_id, requirement_id)): Path<(i64, i64, i64)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    auth.require_owner(employer_id)?;

    EmployerService::remove_requirement(
        &state.db,
        state.cache.as_ref(),
        employer_id,
        activity_id,
        requirement_id,
    )
    .await?;

    Ok(Json(ApiResponse::message("Requirement detached")))
}

#[utoipa::path(
    get,
    path = "/employer/applicants/{employer_id}",
    params(("employer_id" = i64, Path, description = "Employer ID")),
    responses(
        (status = 200, description = "Applicants", body = ApiResponse<Vec<ApplicantSummary>>),
        (status = 403, description = "Not the owner")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn list_applicants(
    State(state): State<AppState>,
    EmployerAuth(auth): EmployerAuth,
    Path(employer_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<ApplicantSummary>>>, AppError> {
    auth.require_owner(employer_id)?;

    let (applicants, source) =
        EmployerService::applicants(&state.db, state.cache.as_ref(), employer_id).await?;

    Ok(Json(ApiResponse::from_source(
        "Applicants fetched",
        applicants,
        source,
    )))
}

#[utoipa::path(
    get,
    path = "/employer/applicants/{employer_id}/{user_id}",
    params(
        ("employer_id" = i64, Path, description = "Employer ID"),
        ("user_id" = i64, Path, description = "Applicant's user ID")
    ),
    responses(
        (status = 200, description = "Applicant detail", body = ApiResponse<ApplicantDetailView>),
        (status = 404, description = "Applicant not found")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn applicant_detail(
    State(state): State<AppState>,
    EmployerAuth(auth): EmployerAuth,
    Path((employer_id, user_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<ApplicantDetailView>>, AppError> {
    auth.require_owner(employer_id)?;

    let (detail, source) =
        EmployerService::applicant_detail(&state.db, state.cache.as_ref(), employer_id, user_id)
            .await?;

    Ok(Json(ApiResponse::from_source(
        "Applicant fetched",
        detail,
        source,
    )))
}

#[utoipa::path(
    put,
    path = "/employer/applicants/{employer_id}/{application_id}/status",
    params(
        ("employer_id" = i64, Path, description = "Employer ID"),
        ("application_id" = i64, Path, description = "Application ID")
    ),
    request_body = UpdateApplicantStatusDto,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Unknown status or missing note"),
        (status = 404, description = "Application not found")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, dto))]
pub async fn update_applicant_status(
    State(state): State<AppState>,
    EmployerAuth(auth): EmployerAuth,
    Path((employer_id, application_id)): Path<(i64, i64)>,
    ValidatedJson(dto): ValidatedJson<UpdateApplicantStatusDto>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    auth.require_owner(employer_id)?;

    EmployerService::update_applicant_status(
        &state.db,
        state.cache.as_ref(),
        employer_id,
        application_id,
        dto,
    )
    .await?;

    Ok(Json(ApiResponse::message("Application status updated")))
}

#[utoipa::path(
    put,
    path = "/employer/applicants/{employer_id}/{application_id}/interview",
    params(
        ("employer_id" = i64, Path, description = "Employer ID"),
        ("application_id" = i64, Path, description = "Application ID")
    ),
    request_body = ScheduleInterviewDto,
    responses(
        (status = 200, description = "Interview scheduled"),
        (status = 404, description = "Application not found")
    ),
    tag = "Employers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, dto))]
pub async fn schedule_interview(
    State(state): State<AppState>,
    EmployerAuth(auth): EmployerAuth,
    Path((employer_id, application_id)): Path<(i64, i64)>,
    ValidatedJson(dto): ValidatedJson<ScheduleInterviewDto>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    auth.require_owner(employer_id)?;

    EmployerService::schedule_interview(
        &state.db,
        state.cache.as_ref(),
        employer_id,
        application_id,
        dto,
    )
    .await?;

    Ok(Json(ApiResponse::message("Interview scheduled")))
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::modules::users::model::{Experience, Skill, UserProfile};
use crate::validator::{validate_password_strength, validate_phone};

/// Application status values an employer may set.
pub mod statuses {
    pub const IN_REVIEW: &str = "In-review";
    pub const SHORTLIST: &str = "Shortlist";
    pub const INTERVIEW: &str = "Interview";
    pub const HIRE: &str = "Hire";
    pub const REJECT: &str = "Reject";
}

fn validate_activity_format(format: &str) -> Result<(), ValidationError> {
    if format == "Online" || format == "Offline" {
        Ok(())
    } else {
        Err(ValidationError::new("format")
            .with_message("Format must be either Online or Offline".into()))
    }
}

/// An employer's own row, without the password hash.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EmployerProfile {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub photo: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterEmployerDto {
    #[validate(length(min = 1, max = 50, message = "Name must be 1 to 50 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "Username must be 1 to 50 characters"))]
    pub username: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(
        length(min = 8, max = 255, message = "Password must be 8 to 255 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployerDto {
    #[validate(length(min = 1, max = 50, message = "Name must be 1 to 50 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: Option<String>,
    pub photo: Option<String>,
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 255, message = "Website must be at most 255 characters"))]
    pub website: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Activity {
    pub id: i64,
    pub employer_id: i64,
    pub category_id: i64,
    pub name: String,
    pub location: String,
    pub duration: String,
    pub format: String,
    pub description: String,
    pub closing_date: NaiveDate,
    pub start_date: NaiveDate,
}

/// List entry for an employer's own activities.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActivityListItem {
    pub id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub name: String,
    pub location: String,
    pub duration: String,
    pub format: String,
    pub closing_date: NaiveDate,
    pub start_date: NaiveDate,
}

/// The cached employer-side activity detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployerActivityView {
    #[serde(flatten)]
    pub activity: Activity,
    pub category_name: String,
    pub benefits: Vec<String>,
    pub requirements: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateActivityDto {
    pub category_id: i64,
    #[validate(length(min = 1, max = 50, message = "Name must be 1 to 50 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "Location must be 1 to 50 characters"))]
    pub location: String,
    #[validate(length(min = 1, max = 50, message = "Duration must be 1 to 50 characters"))]
    pub duration: String,
    #[validate(custom(function = "validate_activity_format"))]
    pub format: String,
    #[validate(length(min = 1, max = 255, message = "Description must be 1 to 255 characters"))]
    pub description: String,
    pub closing_date: NaiveDate,
    pub start_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateActivityDto {
    pub category_id: Option<i64>,
    #[validate(length(min = 1, max = 50, message = "Name must be 1 to 50 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Location must be 1 to 50 characters"))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Duration must be 1 to 50 characters"))]
    pub duration: Option<String>,
    #[validate(custom(function = "validate_activity_format"))]
    pub format: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Description must be 1 to 255 characters"))]
    pub description: Option<String>,
    pub closing_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
}

/// Attaches a benefit or requirement by name; the lookup row is created
/// when it does not exist yet.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AttachItemDto {
    #[validate(length(min = 1, max = 50, message = "Name must be 1 to 50 characters"))]
    pub name: String,
}

/// Row in the cached employer applicant list.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ApplicantSummary {
    pub application_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub activity_id: i64,
    pub activity_name: String,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

/// One of an applicant's applications to this employer.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ApplicantApplication {
    pub application_id: i64,
    pub activity_id: i64,
    pub activity_name: String,
    pub status: String,
    pub motivation: Option<String>,
    pub note_to_applicant: Option<String>,
    pub note_date: Option<NaiveDate>,
    pub interview_date: Option<NaiveDate>,
    pub interview_time: Option<String>,
    pub interview_location: Option<String>,
    pub interview_status: Option<String>,
}

/// The cached employer-side applicant detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApplicantDetailView {
    #[serde(flatten)]
    pub user: UserProfile,
    pub skills: Vec<Skill>,
    pub experiences: Vec<Experience>,
    pub applications: Vec<ApplicantApplication>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateApplicantStatusDto {
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
    #[validate(length(max = 255, message = "Note must be at most 255 characters"))]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ScheduleInterviewDto {
    pub interview_date: NaiveDate,
    #[validate(length(min = 1, max = 20, message = "Interview time must be 1 to 20 characters"))]
    pub interview_time: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Interview location must be 1 to 255 characters"
    ))]
    pub interview_location: String,
}

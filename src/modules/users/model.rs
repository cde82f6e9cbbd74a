use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validator::{validate_password_strength, validate_phone};

/// An applicant's own row, without the password hash.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub photo: Option<String>,
    pub cv: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Skill {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Experience {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// The cached profile view: the row plus its skills and experiences.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserProfileView {
    #[serde(flatten)]
    pub user: UserProfile,
    pub skills: Vec<Skill>,
    pub experiences: Vec<Experience>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserDto {
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
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 50, message = "Name must be 1 to 50 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: Option<String>,
    pub photo: Option<String>,
    pub cv: Option<String>,
    #[validate(length(max = 255, message = "Summary must be at most 255 characters"))]
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ApplyDto {
    #[validate(length(max = 255, message = "Motivation must be at most 255 characters"))]
    pub motivation: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddSkillDto {
    #[validate(length(min = 1, max = 50, message = "Skill name must be 1 to 50 characters"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddExperienceDto {
    #[validate(length(min = 1, max = 50, message = "Title must be 1 to 50 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 50, message = "Company must be 1 to 50 characters"))]
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,
}

/// Public catalog entry, served to anyone browsing activities.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActivitySummary {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub duration: String,
    pub format: String,
    pub closing_date: NaiveDate,
    pub start_date: NaiveDate,
    pub category_name: String,
    pub employer_name: String,
}

/// Public catalog detail: the summary plus description, benefits, and
/// requirements.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActivityDetailView {
    #[serde(flatten)]
    pub activity: ActivitySummary,
    pub description: String,
    pub benefits: Vec<String>,
    pub requirements: Vec<String>,
}

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::admins::model::{AdminProfile, Category, CategoryDto, UpdateAdminDto};
use crate::modules::auth::model::{LoginDto, SessionData};
use crate::modules::employers::model::{
    Activity, ActivityListItem, ApplicantApplication, ApplicantDetailView, ApplicantSummary,
    AttachItemDto, CreateActivityDto, EmployerActivityView, EmployerProfile, RegisterEmployerDto,
    ScheduleInterviewDto, UpdateActivityDto, UpdateApplicantStatusDto, UpdateEmployerDto,
};
use crate::modules::users::model::{
    ActivityDetailView, ActivitySummary, AddExperienceDto, AddSkillDto, ApplyDto, Experience,
    RegisterUserDto, Skill, UpdateUserDto, UserProfile, UserProfileView,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::users::controller::login,
        crate::modules::users::controller::register,
        crate::modules::users::controller::logout,
        crate::modules::users::controller::list_activities,
        crate::modules::users::controller::activity_detail,
        crate::modules::users::controller::profile,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::apply,
        crate::modules::users::controller::add_skill,
        crate::modules::users::controller::remove_skill,
        crate::modules::users::controller::add_experience,
        crate::modules::users::controller::remove_experience,
        crate::modules::employers::controller::login,
        crate::modules::employers::controller::register,
        crate::modules::employers::controller::logout,
        crate::modules::employers::controller::profile,
        crate::modules::employers::controller::update_profile,
        crate::modules::employers::controller::list_activities,
        crate::modules::employers::controller::activity_detail,
        crate::modules::employers::controller::create_activity,
        crate::modules::employers::controller::update_activity,
        crate::modules::employers::controller::delete_activity,
        crate::modules::employers::controller::add_benefit,
        crate::modules::employers::controller::remove_benefit,
        crate::modules::employers::controller::add_requirement,
        crate::modules::employers::controller::remove_requirement,
        crate::modules::employers::controller::list_applicants,
        crate::modules::employers::controller::applicant_detail,
        crate::modules::employers::controller::update_applicant_status,
        crate::modules::employers::controller::schedule_interview,
        crate::modules::admins::controller::login,
        crate::modules::admins::controller::logout,
        crate::modules::admins::controller::profile,
        crate::modules::admins::controller::update_profile,
        crate::modules::admins::controller::list_users,
        crate::modules::admins::controller::user_detail,
        crate::modules::admins::controller::list_employers,
        crate::modules::admins::controller::employer_detail,
        crate::modules::admins::controller::list_categories,
        crate::modules::admins::controller::create_category,
        crate::modules::admins::controller::update_category,
        crate::modules::admins::controller::delete_category,
    ),
    components(
        schemas(
            LoginDto,
            SessionData,
            UserProfile,
            UserProfileView,
            RegisterUserDto,
            UpdateUserDto,
            Skill,
            AddSkillDto,
            Experience,
            AddExperienceDto,
            ApplyDto,
            ActivitySummary,
            ActivityDetailView,
            EmployerProfile,
            RegisterEmployerDto,
            UpdateEmployerDto,
            Activity,
            ActivityListItem,
            EmployerActivityView,
            CreateActivityDto,
            UpdateActivityDto,
            AttachItemDto,
            ApplicantSummary,
            ApplicantApplication,
            ApplicantDetailView,
            UpdateApplicantStatusDto,
            ScheduleInterviewDto,
            AdminProfile,
            UpdateAdminDto,
            Category,
            CategoryDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Applicant accounts, profiles, and applications"),
        (name = "Employers", description = "Employer accounts, activities, and applicant review"),
        (name = "Admins", description = "Administrative views and category management")
    ),
    info(
        title = "Relawan API",
        version = "0.1.0",
        description = "REST backend for a volunteering and internship marketplace.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

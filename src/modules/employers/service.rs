use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::instrument;

use relawan_cache::{CacheSource, Mutation, RedisCache, invalidate, keys, read_through};

use crate::modules::auth::model::Principal;
use crate::modules::employers::model::{
    Activity, ActivityListItem, ApplicantApplication, ApplicantDetailView, ApplicantSummary,
    AttachItemDto, CreateActivityDto, EmployerActivityView, EmployerProfile, RegisterEmployerDto,
    ScheduleInterviewDto, UpdateActivityDto, UpdateApplicantStatusDto, UpdateEmployerDto, statuses,
};
use crate::modules::users::model::{Experience, Skill, UserProfile};
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

/// Resolves the note to store for a status change. Shortlist and Interview
/// carry a standard note when none is given; Hire and Reject require one.
pub fn resolve_status_note(status: &str, note: Option<String>) -> Result<String, AppError> {
    match status {
        statuses::SHORTLIST => {
            Ok(note.unwrap_or_else(|| "Congratulations! You have been shortlisted.".to_string()))
        }
        statuses::INTERVIEW => {
            Ok(note.unwrap_or_else(|| "You have been invited to an interview.".to_string()))
        }
        statuses::HIRE | statuses::REJECT => note.filter(|n| !n.is_empty()).ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!("A note is required for this status"))
        }),
        _ => Err(AppError::bad_request(anyhow::anyhow!(
            "Unknown application status"
        ))),
    }
}

/// An interview scheduled in the past is already complete.
pub fn derive_interview_status(interview_date: NaiveDate, today: NaiveDate) -> &'static str {
    if interview_date < today {
        "Interview Complete"
    } else {
        "On progress"
    }
}

pub struct EmployerService;

impl EmployerService {
    #[instrument(skip(db))]
    pub async fn find_principal(
        db: &PgPool,
        username: &str,
    ) -> Result<Option<Principal>, AppError> {
        let row = sqlx::query_as::<_, (i64, String, String, String)>(
            "SELECT id, username, name, password FROM employers WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(db)
        .await?;

        Ok(row.map(|(id, username, name, password_hash)| Principal {
            id,
            username,
            name: Some(name),
            password_hash,
        }))
    }

    #[instrument(skip(db, cache, dto))]
    pub async fn register(
        db: &PgPool,
        cache: Option<&RedisCache>,
        dto: RegisterEmployerDto,
    ) -> Result<EmployerProfile, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let employer = sqlx::query_as::<_, EmployerProfile>(
            r#"INSERT INTO employers (name, username, email, password, phone)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, name, username, email, phone, address, photo, description, website"#,
        )
        .bind(&dto.name)
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(&dto.phone)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Username is already taken"));
            }
            AppError::from(e)
        })?;

        invalidate(cache, Mutation::EmployerRegistered).await;

        Ok(employer)
    }

    #[instrument(skip(db, cache))]
    pub async fn profile(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
    ) -> Result<(EmployerProfile, CacheSource), AppError> {
        let result = read_through(cache, &keys::employers::profile(employer_id), || async {
            let employer = sqlx::query_as::<_, EmployerProfile>(
                r#"SELECT id, name, username, email, phone, address, photo, description, website
                   FROM employers WHERE id = $1"#,
            )
            .bind(employer_id)
            .fetch_optional(db)
            .await?;

            Ok::<_, AppError>(employer)
        })
        .await?;

        result.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Employer not found")))
    }

    #[instrument(skip(db, cache, dto))]
    pub async fn update_profile(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
        dto: UpdateEmployerDto,
    ) -> Result<EmployerProfile, AppError> {
        let employer = sqlx::query_as::<_, EmployerProfile>(
            r#"UPDATE employers
               SET name = COALESCE($2, name),
                   email = COALESCE($3, email),
                   phone = COALESCE($4, phone),
                   address = COALESCE($5, address),
                   photo = COALESCE($6, photo),
                   description = COALESCE($7, description),
                   website = COALESCE($8, website),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, name, username, email, phone, address, photo, description, website"#,
        )
        .bind(employer_id)
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(&dto.address)
        .bind(&dto.photo)
        .bind(&dto.description)
        .bind(&dto.website)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Employer not found")))?;

        invalidate(cache, Mutation::EmployerProfileUpdated { employer_id }).await;

        Ok(employer)
    }

    #[instrument(skip(db, cache))]
    pub async fn activities(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
    ) -> Result<(Vec<ActivityListItem>, CacheSource), AppError> {
        let result = read_through(cache, &keys::employers::activities(employer_id), || async {
            let activities = sqlx::query_as::<_, ActivityListItem>(
                r#"SELECT
                    a.id, a.category_id, c.name AS category_name,
                    a.name, a.location, a.duration, a.format,
                    a.closing_date, a.start_date
                   FROM activities a
                   JOIN categories c ON c.id = a.category_id
                   WHERE a.employer_id = $1
                   ORDER BY a.created_at DESC"#,
            )
            .bind(employer_id)
            .fetch_all(db)
            .await?;

            Ok::<_, AppError>(Some(activities))
        })
        .await?;

        result.ok_or_else(|| AppError::internal(anyhow::anyhow!("Activity list unavailable")))
    }

    #[instrument(skip(db, cache))]
    pub async fn activity_detail(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
        activity_id: i64,
    ) -> Result<(EmployerActivityView, CacheSource), AppError> {
        let result = read_through(
            cache,
            &keys::employers::activity_detail(employer_id, activity_id),
            || async { Self::load_activity_view(db, employer_id, activity_id).await },
        )
        .await?;

        result.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Activity not found")))
    }

    async fn load_activity_view(
        db: &PgPool,
        employer_id: i64,
        activity_id: i64,
    ) -> Result<Option<EmployerActivityView>, AppError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            #[sqlx(flatten)]
            activity: Activity,
            category_name: String,
        }

        let row = sqlx::query_as::<_, Row>(
            r#"SELECT
                a.id, a.employer_id, a.category_id, a.name, a.location, a.duration,
                a.format, a.description, a.closing_date, a.start_date,
                c.name AS category_name
               FROM activities a
               JOIN categories c ON c.id = a.category_id
               WHERE a.id = $1 AND a.employer_id = $2"#,
        )
        .bind(activity_id)
        .bind(employer_id)
        .fetch_optional(db)
        .await?;

        let Some(Row {
            activity,
            category_name,
        }) = row
        else {
            return Ok(None);
        };

        let benefits = sqlx::query_scalar::<_, String>(
            r#"SELECT b.name FROM benefits b
               JOIN activity_benefits ab ON ab.benefit_id = b.id
               WHERE ab.activity_id = $1 ORDER BY b.name"#,
        )
        .bind(activity_id)
        .fetch_all(db)
        .await?;

        let requirements = sqlx::query_scalar::<_, String>(
            r#"SELECT r.name FROM requirements r
               JOIN activity_requirements ar ON ar.requirement_id = r.id
               WHERE ar.activity_id = $1 ORDER BY r.name"#,
        )
        .bind(activity_id)
        .fetch_all(db)
        .await?;

        Ok(Some(EmployerActivityView {
            activity,
            category_name,
            benefits,
            requirements,
        }))
    }

    #[instrument(skip(db, cache, dto))]
    pub async fn create_activity(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
        dto: CreateActivityDto,
    ) -> Result<Activity, AppError> {
        Self::require_category(db, dto.category_id).await?;

        let activity = sqlx::query_as::<_, Activity>(
            r#"INSERT INTO activities
                (employer_id, category_id, name, location, duration, format,
                 description, closing_date, start_date)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING id, employer_id, category_id, name, location, duration,
                         format, description, closing_date, start_date"#,
        )
        .bind(employer_id)
        .bind(dto.category_id)
        .bind(&dto.name)
        .bind(&dto.location)
        .bind(&dto.duration)
        .bind(&dto.format)
        .bind(&dto.description)
        .bind(dto.closing_date)
        .bind(dto.start_date)
        .fetch_one(db)
        .await?;

        invalidate(cache, Mutation::ActivityCreated { employer_id }).await;

        Ok(activity)
    }

    #[instrument(skip(db, cache, dto))]
    pub async fn update_activity(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
        activity_id: i64,
        dto: UpdateActivityDto,
    ) -> Result<Activity, AppError> {
        if let Some(category_id) = dto.category_id {
            Self::require_category(db, category_id).await?;
        }

        let activity = sqlx::query_as::<_, Activity>(
            r#"UPDATE activities
               SET category_id = COALESCE($3, category_id),
                   name = COALESCE($4, name),
                   location = COALESCE($5, location),
                   duration = COALESCE($6, duration),
                   format = COALESCE($7, format),
                   description = COALESCE($8, description),
                   closing_date = COALESCE($9, closing_date),
                   start_date = COALESCE($10, start_date),
                   updated_at = NOW()
               WHERE id = $1 AND employer_id = $2
               RETURNING id, employer_id, category_id, name, location, duration,
                         format, description, closing_date, start_date"#,
        )
        .bind(activity_id)
        .bind(employer_id)
        .bind(dto.category_id)
        .bind(&dto.name)
        .bind(&dto.location)
        .bind(&dto.duration)
        .bind(&dto.format)
        .bind(&dto.description)
        .bind(dto.closing_date)
        .bind(dto.start_date)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Activity not found")))?;

        invalidate(
            cache,
            Mutation::ActivityUpdated {
                employer_id,
                activity_id,
            },
        )
        .await;

        Ok(activity)
    }

    #[instrument(skip(db, cache))]
    pub async fn delete_activity(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
        activity_id: i64,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1 AND employer_id = $2")
            .bind(activity_id)
            .bind(employer_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Activity not found")));
        }

        invalidate(
            cache,
            Mutation::ActivityDeleted {
                employer_id,
                activity_id,
            },
        )
        .await;

        Ok(())
    }

    #[instrument(skip(db, cache, dto))]
    pub async fn add_benefit(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
        activity_id: i64,
        dto: AttachItemDto,
    ) -> Result<(), AppError> {
        Self::require_owned_activity(db, employer_id, activity_id).await?;

        let benefit_id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO benefits (name) VALUES ($1)
               ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
               RETURNING id"#,
        )
        .bind(&dto.name)
        .fetch_one(db)
        .await?;

        sqlx::query(
            r#"INSERT INTO activity_benefits (activity_id, benefit_id) VALUES ($1, $2)
               ON CONFLICT DO NOTHING"#,
        )
        .bind(activity_id)
        .bind(benefit_id)
        .execute(db)
        .await?;

        invalidate(
            cache,
            Mutation::ActivityCompositionChanged {
                employer_id,
                activity_id,
            },
        )
        .await;

        Ok(())
    }

    #[instrument(skip(db, cache))]
    pub async fn remove_benefit(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
        activity_id: i64,
        benefit_id: i64,
    ) -> Result<(), AppError> {
        Self::require_owned_activity(db, employer_id, activity_id).await?;

        let result =
            sqlx::query("DELETE FROM activity_benefits WHERE activity_id = $1 AND benefit_id = $2")
                .bind(activity_id)
                .bind(benefit_id)
                .execute(db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Benefit not found")));
        }

        sqlx::query(
            r#"DELETE FROM benefits
               WHERE id = $1
                 AND NOT EXISTS (SELECT 1 FROM activity_benefits WHERE benefit_id = $1)"#,
        )
        .bind(benefit_id)
        .execute(db)
        .await?;

        invalidate(
            cache,
            Mutation::ActivityCompositionChanged {
                employer_id,
                activity_id,
            },
        )
        .await;

        Ok(())
    }

    #[instrument(skip(db, cache, dto))]
    pub async fn add_requirement(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
        activity_id: i64,
        dto: AttachItemDto,
    ) -> Result<(), AppError> {
        Self::require_owned_activity(db, employer_id, activity_id).await?;

        let requirement_id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO requirements (name) VALUES ($1)
               ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
               RETURNING id"#,
        )
        .bind(&dto.name)
        .fetch_one(db)
        .await?;

        sqlx::query(
            r#"INSERT INTO activity_requirements (activity_id, requirement_id) VALUES ($1, $2)
               ON CONFLICT DO NOTHING"#,
        )
        .bind(activity_id)
        .bind(requirement_id)
        .execute(db)
        .await?;

        invalidate(
            cache,
            Mutation::ActivityCompositionChanged {
                employer_id,
                activity_id,
            },
        )
        .await;

        Ok(())
    }

    #[instrument(skip(db, cache))]
    pub async fn remove_requirement(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
        activity_id: i64,
        requirement_id: i64,
    ) -> Result<(), AppError> {
        Self::require_owned_activity(db, employer_id, activity_id).await?;

        let result = sqlx::query(
            "DELETE FROM activity_requirements WHERE activity_id = $1 AND requirement_id = $2",
        )
        .bind(activity_id)
        .bind(requirement_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Requirement not found"
            )));
        }

        sqlx::query(
            r#"DELETE FROM requirements
               WHERE id = $1
                 AND NOT EXISTS (SELECT 1 FROM activity_requirements WHERE requirement_id = $1)"#,
        )
        .bind(requirement_id)
        .execute(db)
        .await?;

        invalidate(
            cache,
            Mutation::ActivityCompositionChanged {
                employer_id,
                activity_id,
            },
        )
        .await;

        Ok(())
    }

    #[instrument(skip(db, cache))]
    pub async fn applicants(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
    ) -> Result<(Vec<ApplicantSummary>, CacheSource), AppError> {
        let result = read_through(cache, &keys::employers::applicants(employer_id), || async {
            let applicants = sqlx::query_as::<_, ApplicantSummary>(
                r#"SELECT
                    ap.id AS application_id,
                    u.id AS user_id,
                    u.name AS user_name,
                    a.id AS activity_id,
                    a.name AS activity_name,
                    ap.status,
                    ap.created_at AS applied_at
                   FROM applications ap
                   JOIN activities a ON a.id = ap.activity_id
                   JOIN users u ON u.id = ap.user_id
                   WHERE a.employer_id = $1
                   ORDER BY ap.created_at DESC"#,
            )
            .bind(employer_id)
            .fetch_all(db)
            .await?;

            Ok::<_, AppError>(Some(applicants))
        })
        .await?;

        result.ok_or_else(|| AppError::internal(anyhow::anyhow!("Applicant list unavailable")))
    }

    #[instrument(skip(db, cache))]
    pub async fn applicant_detail(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
        user_id: i64,
    ) -> Result<(ApplicantDetailView, CacheSource), AppError> {
        let result = read_through(
            cache,
            &keys::employers::applicant_detail(employer_id, user_id),
            || async { Self::load_applicant_view(db, employer_id, user_id).await },
        )
        .await?;

        result.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Applicant not found")))
    }

    async fn load_applicant_view(
        db: &PgPool,
        employer_id: i64,
        user_id: i64,
    ) -> Result<Option<ApplicantDetailView>, AppError> {
        let applications = sqlx::query_as::<_, ApplicantApplication>(
            r#"SELECT
                ap.id AS application_id,
                a.id AS activity_id,
                a.name AS activity_name,
                ap.status, ap.motivation, ap.note_to_applicant, ap.note_date,
                ap.interview_date, ap.interview_time, ap.interview_location,
                ap.interview_status
               FROM applications ap
               JOIN activities a ON a.id = ap.activity_id
               WHERE a.employer_id = $1 AND ap.user_id = $2
               ORDER BY ap.created_at DESC"#,
        )
        .bind(employer_id)
        .bind(user_id)
        .fetch_all(db)
        .await?;

        // A user with no applications here is not this employer's applicant
        if applications.is_empty() {
            return Ok(None);
        }

        let user = sqlx::query_as::<_, UserProfile>(
            r#"SELECT id, name, username, email, phone, address, photo, cv, summary
               FROM users WHERE id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        let Some(user) = user else {
            return Ok(None);
        };

        let skills = sqlx::query_as::<_, Skill>(
            r#"SELECT s.id, s.name
               FROM skills s
               JOIN user_skills us ON us.skill_id = s.id
               WHERE us.user_id = $1
               ORDER BY s.name"#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        let experiences = sqlx::query_as::<_, Experience>(
            r#"SELECT id, title, company, start_date, end_date, description
               FROM experiences
               WHERE user_id = $1
               ORDER BY start_date DESC"#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(Some(ApplicantDetailView {
            user,
            skills,
            experiences,
            applications,
        }))
    }

    /// Applies the applicant status machine to one application.
    #[instrument(skip(db, cache, dto))]
    pub async fn update_applicant_status(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
        application_id: i64,
        dto: UpdateApplicantStatusDto,
    ) -> Result<(), AppError> {
        let note = resolve_status_note(&dto.status, dto.note)?;

        let user_id = Self::require_owned_application(db, employer_id, application_id).await?;

        sqlx::query(
            r#"UPDATE applications
               SET status = $2, note_to_applicant = $3, note_date = CURRENT_DATE,
                   updated_at = NOW()
               WHERE id = $1"#,
        )
        .bind(application_id)
        .bind(&dto.status)
        .bind(&note)
        .execute(db)
        .await?;

        invalidate(
            cache,
            Mutation::ApplicationUpdated {
                employer_id,
                user_id,
            },
        )
        .await;

        Ok(())
    }

    /// Schedules an interview: sets the status to Interview and derives
    /// the interview progress from the date.
    #[instrument(skip(db, cache, dto))]
    pub async fn schedule_interview(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
        application_id: i64,
        dto: ScheduleInterviewDto,
    ) -> Result<(), AppError> {
        let user_id = Self::require_owned_application(db, employer_id, application_id).await?;

        let interview_status =
            derive_interview_status(dto.interview_date, Utc::now().date_naive());

        sqlx::query(
            r#"UPDATE applications
               SET status = $2, interview_date = $3, interview_time = $4,
                   interview_location = $5, interview_status = $6, updated_at = NOW()
               WHERE id = $1"#,
        )
        .bind(application_id)
        .bind(statuses::INTERVIEW)
        .bind(dto.interview_date)
        .bind(&dto.interview_time)
        .bind(&dto.interview_location)
        .bind(interview_status)
        .execute(db)
        .await?;

        invalidate(
            cache,
            Mutation::ApplicationUpdated {
                employer_id,
                user_id,
            },
        )
        .await;

        Ok(())
    }

    async fn require_category(db: &PgPool, category_id: i64) -> Result<(), AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(category_id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Category does not exist"
            )));
        }
        Ok(())
    }

    async fn require_owned_activity(
        db: &PgPool,
        employer_id: i64,
        activity_id: i64,
    ) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM activities WHERE id = $1 AND employer_id = $2)",
        )
        .bind(activity_id)
        .bind(employer_id)
        .fetch_one(db)
        .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Activity not found")));
        }
        Ok(())
    }

    /// Verifies an application belongs to this employer, returning the
    /// applicant's user id for invalidation.
    async fn require_owned_application(
        db: &PgPool,
        employer_id: i64,
        application_id: i64,
    ) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT ap.user_id
               FROM applications ap
               JOIN activities a ON a.id = ap.activity_id
               WHERE ap.id = $1 AND a.employer_id = $2"#,
        )
        .bind(application_id)
        .bind(employer_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Application not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortlist_and_interview_get_standard_notes() {
        let note = resolve_status_note(statuses::SHORTLIST, None).unwrap();
        assert!(note.contains("shortlisted"));

        let note = resolve_status_note(statuses::INTERVIEW, None).unwrap();
        assert!(note.contains("interview"));

        // a provided note wins
        let note = resolve_status_note(statuses::SHORTLIST, Some("Well done".into())).unwrap();
        assert_eq!(note, "Well done");
    }

    #[test]
    fn hire_and_reject_require_a_note() {
        assert!(resolve_status_note(statuses::HIRE, None).is_err());
        assert!(resolve_status_note(statuses::REJECT, Some(String::new())).is_err());

        let note = resolve_status_note(statuses::HIRE, Some("Welcome aboard".into())).unwrap();
        assert_eq!(note, "Welcome aboard");
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = resolve_status_note("Pending", Some("x".into())).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn interview_status_follows_the_date() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let past = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(derive_interview_status(past, today), "Interview Complete");

        assert_eq!(derive_interview_status(today, today), "On progress");

        let future = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        assert_eq!(derive_interview_status(future, today), "On progress");
    }
}

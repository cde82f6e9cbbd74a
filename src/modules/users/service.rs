use sqlx::PgPool;
use tracing::instrument;

use relawan_cache::{CacheSource, Mutation, RedisCache, invalidate, keys, read_through};

use crate::modules::auth::model::Principal;
use crate::modules::users::model::{
    ActivityDetailView, ActivitySummary, AddExperienceDto, AddSkillDto, ApplyDto, Experience,
    RegisterUserDto, Skill, UpdateUserDto, UserProfile, UserProfileView,
};
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

#[derive(sqlx::FromRow)]
struct ActivityDetailRow {
    id: i64,
    name: String,
    location: String,
    duration: String,
    format: String,
    description: String,
    closing_date: chrono::NaiveDate,
    start_date: chrono::NaiveDate,
    category_name: String,
    employer_name: String,
}

pub struct UserService;

impl UserService {
    /// Loads the login candidate for a username.
    #[instrument(skip(db))]
    pub async fn find_principal(
        db: &PgPool,
        username: &str,
    ) -> Result<Option<Principal>, AppError> {
        let row = sqlx::query_as::<_, (i64, String, String, String)>(
            "SELECT id, username, name, password FROM users WHERE username = $1",
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
        dto: RegisterUserDto,
    ) -> Result<UserProfile, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, UserProfile>(
            r#"INSERT INTO users (name, username, email, password, phone)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, name, username, email, phone, address, photo, cv, summary"#,
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

        invalidate(cache, Mutation::UserRegistered).await;

        Ok(user)
    }

    #[instrument(skip(db, cache))]
    pub async fn profile(
        db: &PgPool,
        cache: Option<&RedisCache>,
        user_id: i64,
    ) -> Result<(UserProfileView, CacheSource), AppError> {
        let result = read_through(cache, &keys::users::profile(user_id), || async {
            Self::load_profile_view(db, user_id).await
        })
        .await?;

        result.ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    pub(crate) async fn load_profile_view(
        db: &PgPool,
        user_id: i64,
    ) -> Result<Option<UserProfileView>, AppError> {
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

        Ok(Some(UserProfileView {
            user,
            skills,
            experiences,
        }))
    }

    #[instrument(skip(db, cache, dto))]
    pub async fn update_profile(
        db: &PgPool,
        cache: Option<&RedisCache>,
        user_id: i64,
        dto: UpdateUserDto,
    ) -> Result<UserProfile, AppError> {
        let user = sqlx::query_as::<_, UserProfile>(
            r#"UPDATE users
               SET name = COALESCE($2, name),
                   email = COALESCE($3, email),
                   phone = COALESCE($4, phone),
                   address = COALESCE($5, address),
                   photo = COALESCE($6, photo),
                   cv = COALESCE($7, cv),
                   summary = COALESCE($8, summary),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, name, username, email, phone, address, photo, cv, summary"#,
        )
        .bind(user_id)
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(&dto.address)
        .bind(&dto.photo)
        .bind(&dto.cv)
        .bind(&dto.summary)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        invalidate(cache, Mutation::UserProfileUpdated { user_id }).await;

        Ok(user)
    }

    #[instrument(skip(db, cache))]
    pub async fn public_activities(
        db: &PgPool,
        cache: Option<&RedisCache>,
    ) -> Result<(Vec<ActivitySummary>, CacheSource), AppError> {
        let result = read_through(cache, &keys::activities::all(), || async {
            let activities = sqlx::query_as::<_, ActivitySummary>(
                r#"SELECT
                    a.id, a.name, a.location, a.duration, a.format,
                    a.closing_date, a.start_date,
                    c.name AS category_name,
                    e.name AS employer_name
                   FROM activities a
                   JOIN categories c ON c.id = a.category_id
                   JOIN employers e ON e.id = a.employer_id
                   ORDER BY a.created_at DESC"#,
            )
            .fetch_all(db)
            .await?;

            Ok::<_, AppError>(Some(activities))
        })
        .await?;

        // the loader always returns Some
        result.ok_or_else(|| AppError::internal(anyhow::anyhow!("Activity list unavailable")))
    }

    #[instrument(skip(db, cache))]
    pub async fn public_activity_detail(
        db: &PgPool,
        cache: Option<&RedisCache>,
        activity_id: i64,
    ) -> Result<(ActivityDetailView, CacheSource), AppError> {
        let result = read_through(cache, &keys::activities::detail(activity_id), || async {
            Self::load_activity_detail(db, activity_id).await
        })
        .await?;

        result.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Activity not found")))
    }

    async fn load_activity_detail(
        db: &PgPool,
        activity_id: i64,
    ) -> Result<Option<ActivityDetailView>, AppError> {
        let row = sqlx::query_as::<_, ActivityDetailRow>(
            r#"SELECT
                a.id, a.name, a.location, a.duration, a.format, a.description,
                a.closing_date, a.start_date,
                c.name AS category_name,
                e.name AS employer_name
               FROM activities a
               JOIN categories c ON c.id = a.category_id
               JOIN employers e ON e.id = a.employer_id
               WHERE a.id = $1"#,
        )
        .bind(activity_id)
        .fetch_optional(db)
        .await?;

        let Some(row) = row else {
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

        Ok(Some(ActivityDetailView {
            activity: ActivitySummary {
                id: row.id,
                name: row.name,
                location: row.location,
                duration: row.duration,
                format: row.format,
                closing_date: row.closing_date,
                start_date: row.start_date,
                category_name: row.category_name,
                employer_name: row.employer_name,
            },
            description: row.description,
            benefits,
            requirements,
        }))
    }

    /// Submits an application. The user must have a CV on file and may
    /// apply to an activity only once.
    #[instrument(skip(db, cache, dto))]
    pub async fn apply(
        db: &PgPool,
        cache: Option<&RedisCache>,
        user_id: i64,
        activity_id: i64,
        dto: ApplyDto,
    ) -> Result<(), AppError> {
        let cv = sqlx::query_scalar::<_, Option<String>>("SELECT cv FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if cv.is_none() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Upload your CV before applying"
            )));
        }

        let employer_id =
            sqlx::query_scalar::<_, i64>("SELECT employer_id FROM activities WHERE id = $1")
                .bind(activity_id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Activity not found")))?;

        sqlx::query(
            r#"INSERT INTO applications (user_id, activity_id, motivation)
               VALUES ($1, $2, $3)"#,
        )
        .bind(user_id)
        .bind(activity_id)
        .bind(&dto.motivation)
        .execute(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "You have already applied to this activity"
                ));
            }
            AppError::from(e)
        })?;

        invalidate(
            cache,
            Mutation::ApplicationSubmitted {
                employer_id,
                user_id,
            },
        )
        .await;

        Ok(())
    }

    /// Attaches a skill, creating the lookup row when it does not exist.
    #[instrument(skip(db, cache, dto))]
    pub async fn add_skill(
        db: &PgPool,
        cache: Option<&RedisCache>,
        user_id: i64,
        dto: AddSkillDto,
    ) -> Result<Skill, AppError> {
        let skill = sqlx::query_as::<_, Skill>(
            r#"INSERT INTO skills (name) VALUES ($1)
               ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
               RETURNING id, name"#,
        )
        .bind(&dto.name)
        .fetch_one(db)
        .await?;

        sqlx::query(
            r#"INSERT INTO user_skills (user_id, skill_id) VALUES ($1, $2)
               ON CONFLICT DO NOTHING"#,
        )
        .bind(user_id)
        .bind(skill.id)
        .execute(db)
        .await?;

        invalidate(cache, Mutation::UserProfileUpdated { user_id }).await;

        Ok(skill)
    }

    /// Detaches a skill and deletes the lookup row once nobody holds it.
    #[instrument(skip(db, cache))]
    pub async fn remove_skill(
        db: &PgPool,
        cache: Option<&RedisCache>,
        user_id: i64,
        skill_id: i64,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM user_skills WHERE user_id = $1 AND skill_id = $2")
            .bind(user_id)
            .bind(skill_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Skill not found")));
        }

        sqlx::query(
            r#"DELETE FROM skills
               WHERE id = $1
                 AND NOT EXISTS (SELECT 1 FROM user_skills WHERE skill_id = $1)"#,
        )
        .bind(skill_id)
        .execute(db)
        .await?;

        invalidate(cache, Mutation::UserProfileUpdated { user_id }).await;

        Ok(())
    }

    #[instrument(skip(db, cache, dto))]
    pub async fn add_experience(
        db: &PgPool,
        cache: Option<&RedisCache>,
        user_id: i64,
        dto: AddExperienceDto,
    ) -> Result<Experience, AppError> {
        let experience = sqlx::query_as::<_, Experience>(
            r#"INSERT INTO experiences (user_id, title, company, start_date, end_date, description)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, title, company, start_date, end_date, description"#,
        )
        .bind(user_id)
        .bind(&dto.title)
        .bind(&dto.company)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(&dto.description)
        .fetch_one(db)
        .await?;

        invalidate(cache, Mutation::UserProfileUpdated { user_id }).await;

        Ok(experience)
    }

    #[instrument(skip(db, cache))]
    pub async fn remove_experience(
        db: &PgPool,
        cache: Option<&RedisCache>,
        user_id: i64,
        experience_id: i64,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM experiences WHERE id = $1 AND user_id = $2")
            .bind(experience_id)
            .bind(user_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Experience not found")));
        }

        invalidate(cache, Mutation::UserProfileUpdated { user_id }).await;

        Ok(())
    }
}

use sqlx::PgPool;
use tracing::instrument;

use relawan_cache::{CacheSource, Mutation, RedisCache, invalidate, keys, read_through};

use crate::modules::admins::model::{AdminProfile, Category, CategoryDto, UpdateAdminDto};
use crate::modules::auth::model::Principal;
use crate::modules::employers::model::EmployerProfile;
use crate::modules::users::model::{UserProfile, UserProfileView};
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;

pub struct AdminService;

impl AdminService {
    /// Loads the login candidate for a username.
    #[instrument(skip(db))]
    pub async fn find_principal(
        db: &PgPool,
        username: &str,
    ) -> Result<Option<Principal>, AppError> {
        let row = sqlx::query_as::<_, (i64, String, Option<String>, String)>(
            "SELECT id, username, name, password FROM admins WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(db)
        .await?;

        Ok(row.map(|(id, username, name, password_hash)| Principal {
            id,
            username,
            name,
            password_hash,
        }))
    }

    #[instrument(skip(db, cache))]
    pub async fn profile(
        db: &PgPool,
        cache: Option<&RedisCache>,
        admin_id: i64,
    ) -> Result<(AdminProfile, CacheSource), AppError> {
        let result = read_through(cache, &keys::admins::profile(admin_id), || async {
            let admin = sqlx::query_as::<_, AdminProfile>(
                "SELECT id, name, username, email FROM admins WHERE id = $1",
            )
            .bind(admin_id)
            .fetch_optional(db)
            .await?;

            Ok::<_, AppError>(admin)
        })
        .await?;

        result.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Admin not found")))
    }

    #[instrument(skip(db, cache, dto))]
    pub async fn update_profile(
        db: &PgPool,
        cache: Option<&RedisCache>,
        admin_id: i64,
        dto: UpdateAdminDto,
    ) -> Result<AdminProfile, AppError> {
        let admin = sqlx::query_as::<_, AdminProfile>(
            r#"UPDATE admins
               SET name = COALESCE($2, name),
                   email = COALESCE($3, email),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, name, username, email"#,
        )
        .bind(admin_id)
        .bind(&dto.name)
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Admin not found")))?;

        invalidate(cache, Mutation::AdminProfileUpdated { admin_id }).await;

        Ok(admin)
    }

    #[instrument(skip(db, cache))]
    pub async fn users(
        db: &PgPool,
        cache: Option<&RedisCache>,
    ) -> Result<(Vec<UserProfile>, CacheSource), AppError> {
        let result = read_through(cache, &keys::users::all(), || async {
            let users = sqlx::query_as::<_, UserProfile>(
                r#"SELECT id, name, username, email, phone, address, photo, cv, summary
                   FROM users ORDER BY name"#,
            )
            .fetch_all(db)
            .await?;

            Ok::<_, AppError>(Some(users))
        })
        .await?;

        result.ok_or_else(|| AppError::internal(anyhow::anyhow!("User list unavailable")))
    }

    #[instrument(skip(db, cache))]
    pub async fn user_detail(
        db: &PgPool,
        cache: Option<&RedisCache>,
        user_id: i64,
    ) -> Result<(UserProfileView, CacheSource), AppError> {
        let result = read_through(cache, &keys::users::detail(user_id), || async {
            UserService::load_profile_view(db, user_id).await
        })
        .await?;

        result.ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    #[instrument(skip(db, cache))]
    pub async fn employers(
        db: &PgPool,
        cache: Option<&RedisCache>,
    ) -> Result<(Vec<EmployerProfile>, CacheSource), AppError> {
        let result = read_through(cache, &keys::employers::all(), || async {
            let employers = sqlx::query_as::<_, EmployerProfile>(
                r#"SELECT id, name, username, email, phone, address, photo, description, website
                   FROM employers ORDER BY name"#,
            )
            .fetch_all(db)
            .await?;

            Ok::<_, AppError>(Some(employers))
        })
        .await?;

        result.ok_or_else(|| AppError::internal(anyhow::anyhow!("Employer list unavailable")))
    }

    #[instrument(skip(db, cache))]
    pub async fn employer_detail(
        db: &PgPool,
        cache: Option<&RedisCache>,
        employer_id: i64,
    ) -> Result<(EmployerProfile, CacheSource), AppError> {
        let result = read_through(cache, &keys::employers::detail(employer_id), || async {
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

    #[instrument(skip(db, cache))]
    pub async fn categories(
        db: &PgPool,
        cache: Option<&RedisCache>,
    ) -> Result<(Vec<Category>, CacheSource), AppError> {
        let result = read_through(cache, &keys::categories::all(), || async {
            let categories =
                sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
                    .fetch_all(db)
                    .await?;

            Ok::<_, AppError>(Some(categories))
        })
        .await?;

        result.ok_or_else(|| AppError::internal(anyhow::anyhow!("Category list unavailable")))
    }

    #[instrument(skip(db, cache, dto))]
    pub async fn create_category(
        db: &PgPool,
        cache: Option<&RedisCache>,
        dto: CategoryDto,
    ) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&dto.name)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Category already exists"));
            }
            AppError::from(e)
        })?;

        invalidate(cache, Mutation::CategoryMutated).await;

        Ok(category)
    }

    #[instrument(skip(db, cache, dto))]
    pub async fn update_category(
        db: &PgPool,
        cache: Option<&RedisCache>,
        category_id: i64,
        dto: CategoryDto,
    ) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(category_id)
        .bind(&dto.name)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Category already exists"));
            }
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Category not found")))?;

        invalidate(cache, Mutation::CategoryMutated).await;

        Ok(category)
    }

    /// Deletes a category. Fails while any activity still references it.
    #[instrument(skip(db, cache))]
    pub async fn delete_category(
        db: &PgPool,
        cache: Option<&RedisCache>,
        category_id: i64,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_foreign_key_violation()
                {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Category is still in use by activities"
                    ));
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Category not found")));
        }

        invalidate(cache, Mutation::CategoryMutated).await;

        Ok(())
    }
}

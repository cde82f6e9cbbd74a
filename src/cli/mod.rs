use sqlx::PgPool;

use crate::utils::password::hash_password;

/// Provisions an admin account. Admins have no registration endpoint, so
/// this is the only way one comes into existence.
pub async fn create_admin(
    db: &PgPool,
    username: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        "INSERT INTO admins (username, password) VALUES ($1, $2)
         ON CONFLICT (username) DO NOTHING",
    )
    .bind(username)
    .bind(hashed_password)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err("An admin with this username already exists".into());
    }

    Ok(())
}

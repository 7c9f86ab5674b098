use sqlx::PgPool;

use crate::utils::password::hash_password;

/// Creates a login user. There is no registration endpoint; accounts are
/// provisioned through this command only.
pub async fn create_user(
    db: &PgPool,
    username: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        "INSERT INTO users (username, password)
         VALUES ($1, $2)
         ON CONFLICT (username) DO NOTHING",
    )
    .bind(username)
    .bind(hashed_password)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err("User with this username already exists".into());
    }

    Ok(())
}

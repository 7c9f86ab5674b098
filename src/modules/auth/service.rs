use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::instrument;

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::verify_password;

use super::model::LoginRequest;

pub struct AuthService;

impl AuthService {
    /// Checks credentials and issues a signed token. Unknown usernames and
    /// wrong passwords get the same generic rejection.
    #[instrument(skip_all)]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<String, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            username: String,
            password: String,
        }

        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT username, password FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await
        .context("Failed to look up user")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid username or password")))?;

        if !verify_password(&dto.password, &user.password)? {
            return Err(AppError::unauthorized(anyhow!(
                "Invalid username or password"
            )));
        }

        create_access_token(&user.username, jwt_config)
    }
}

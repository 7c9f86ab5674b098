use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{Class, ClassDto};

pub struct ClassService;

impl ClassService {
    #[instrument(skip_all)]
    pub async fn get_classes(
        db: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Class>, i64), AppError> {
        let classes = sqlx::query_as::<_, Class>(
            "SELECT id, full_name, is_deleted, created_at, updated_at
             FROM classes
             WHERE is_deleted = 0
             ORDER BY full_name
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .context("Failed to fetch classes")
        .map_err(AppError::database)?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM classes WHERE is_deleted = 0")
                .fetch_one(db)
                .await
                .context("Failed to count classes")
                .map_err(AppError::database)?;

        Ok((classes, total))
    }

    #[instrument(skip_all)]
    pub async fn get_class(db: &PgPool, id: Uuid) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(
            "SELECT id, full_name, is_deleted, created_at, updated_at
             FROM classes
             WHERE id = $1 AND is_deleted = 0",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch class by id")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("Class not found")))
    }

    /// Whether an active (non-deleted) class with this id exists. Used when
    /// validating the class reference on student records.
    #[instrument(skip_all)]
    pub async fn exists(db: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM classes WHERE id = $1 AND is_deleted = 0",
        )
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to check class existence")
        .map_err(AppError::database)?;

        Ok(count > 0)
    }

    #[instrument(skip_all)]
    pub async fn create_class(db: &PgPool, dto: ClassDto) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(
            "INSERT INTO classes (full_name)
             VALUES ($1)
             RETURNING id, full_name, is_deleted, created_at, updated_at",
        )
        .bind(&dto.full_name)
        .fetch_one(db)
        .await
        .context("Failed to insert class")
        .map_err(AppError::database)
    }

    #[instrument(skip_all)]
    pub async fn update_class(db: &PgPool, id: Uuid, dto: ClassDto) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(
            "UPDATE classes
             SET full_name = $1, updated_at = NOW()
             WHERE id = $2 AND is_deleted = 0
             RETURNING id, full_name, is_deleted, created_at, updated_at",
        )
        .bind(&dto.full_name)
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to update class")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("Class not found")))
    }

    /// Soft delete: one-way flag flip, no resurrection path.
    #[instrument(skip_all)]
    pub async fn delete_class(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE classes SET is_deleted = 1, updated_at = NOW()
             WHERE id = $1 AND is_deleted = 0",
        )
        .bind(id)
        .execute(db)
        .await
        .context("Failed to delete class")
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Class not found")));
        }

        Ok(())
    }
}

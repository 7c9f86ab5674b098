use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{Student, StudentForm};

pub struct StudentService;

impl StudentService {
    #[instrument(skip_all)]
    pub async fn create_student(
        db: &PgPool,
        form: &StudentForm,
        avatar: Option<String>,
    ) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(
            "INSERT INTO students (first_name, last_name, class_id, gender, day_of_birth, avatar)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, first_name, last_name, class_id, gender, day_of_birth, avatar,
                       is_deleted, created_at, updated_at",
        )
        .bind(&form.first_name)
        .bind(&form.last_name)
        .bind(form.class_id)
        .bind(form.gender.unwrap_or(1))
        .bind(&form.day_of_birth)
        .bind(&avatar)
        .fetch_one(db)
        .await
        .context("Failed to insert student")
        .map_err(AppError::database)
    }

    /// Paginated listing of active students, ordered by name, optionally
    /// restricted to one class.
    #[instrument(skip_all)]
    pub async fn get_students(
        db: &PgPool,
        class_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Student>, i64), AppError> {
        let (students, total) = match class_id {
            Some(class_id) => {
                let students = sqlx::query_as::<_, Student>(
                    "SELECT id, first_name, last_name, class_id, gender, day_of_birth, avatar,
                            is_deleted, created_at, updated_at
                     FROM students
                     WHERE is_deleted = 0 AND class_id = $1
                     ORDER BY last_name, first_name
                     LIMIT $2 OFFSET $3",
                )
                .bind(class_id)
                .bind(limit)
                .bind(offset)
                .fetch_all(db)
                .await
                .context("Failed to fetch students")
                .map_err(AppError::database)?;

                let total = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM students WHERE is_deleted = 0 AND class_id = $1",
                )
                .bind(class_id)
                .fetch_one(db)
                .await
                .context("Failed to count students")
                .map_err(AppError::database)?;

                (students, total)
            }
            None => {
                let students = sqlx::query_as::<_, Student>(
                    "SELECT id, first_name, last_name, class_id, gender, day_of_birth, avatar,
                            is_deleted, created_at, updated_at
                     FROM students
                     WHERE is_deleted = 0
                     ORDER BY last_name, first_name
                     LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(db)
                .await
                .context("Failed to fetch students")
                .map_err(AppError::database)?;

                let total = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM students WHERE is_deleted = 0",
                )
                .fetch_one(db)
                .await
                .context("Failed to count students")
                .map_err(AppError::database)?;

                (students, total)
            }
        };

        Ok((students, total))
    }

    #[instrument(skip_all)]
    pub async fn get_student(db: &PgPool, id: Uuid) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(
            "SELECT id, first_name, last_name, class_id, gender, day_of_birth, avatar,
                    is_deleted, created_at, updated_at
             FROM students
             WHERE id = $1 AND is_deleted = 0",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch student by id")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    /// Full overwrite of the mutable fields. The avatar path has already
    /// been resolved by the caller (new upload or carried over).
    #[instrument(skip_all)]
    pub async fn update_student(
        db: &PgPool,
        id: Uuid,
        form: &StudentForm,
        avatar: Option<String>,
    ) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(
            "UPDATE students
             SET first_name = $1, last_name = $2, class_id = $3, gender = $4,
                 day_of_birth = $5, avatar = $6, updated_at = NOW()
             WHERE id = $7 AND is_deleted = 0
             RETURNING id, first_name, last_name, class_id, gender, day_of_birth, avatar,
                       is_deleted, created_at, updated_at",
        )
        .bind(&form.first_name)
        .bind(&form.last_name)
        .bind(form.class_id)
        .bind(form.gender.unwrap_or(1))
        .bind(&form.day_of_birth)
        .bind(&avatar)
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to update student")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    /// Soft delete: one-way flag flip, no resurrection path. The row stays
    /// in the table with `is_deleted = 1`.
    #[instrument(skip_all)]
    pub async fn delete_student(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE students SET is_deleted = 1, updated_at = NOW()
             WHERE id = $1 AND is_deleted = 0",
        )
        .bind(id)
        .execute(db)
        .await
        .context("Failed to delete student")
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }

        Ok(())
    }
}

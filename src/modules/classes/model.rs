use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A class record. The UUID primary key is the canonical class identifier;
/// `is_deleted` is the soft-delete flag (0 = active, 1 = deleted).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: Uuid,
    pub full_name: String,
    pub is_deleted: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload. Updates overwrite the full mutable field set.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassDto {
    #[validate(
        length(min = 1, max = 200, message = "fullName must be between 1 and 200 characters"),
        custom(function = validate_not_blank, message = "fullName must not be blank")
    )]
    pub full_name: String,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

use anyhow::anyhow;
use axum::body::Bytes;
use axum::extract::Multipart;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::utils::errors::AppError;
use crate::utils::pagination::{PaginationParams, deserialize_optional_i64};

/// A student record.
///
/// `gender` is 1 or 2 (defaults to 1). `day_of_birth` is kept as submitted
/// in `dd/mm/yyyy` form. `avatar` is the relative storage key of the
/// uploaded image, servable under `/uploads`. `is_deleted` is the
/// soft-delete flag (0 = active, 1 = deleted).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub class_id: Uuid,
    pub gender: i16,
    pub day_of_birth: Option<String>,
    pub avatar: Option<String>,
    pub is_deleted: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An avatar image captured from the multipart form.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content: Bytes,
}

/// Create/update form fields, parsed from a `multipart/form-data` body.
/// Updates overwrite the full mutable field set with these values.
#[derive(Debug, Validate, ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct StudentForm {
    #[validate(
        length(min = 1, max = 100, message = "firstName must be between 1 and 100 characters"),
        custom(
            function = validate_person_name,
            message = "firstName may only contain letters, spaces, hyphens and apostrophes"
        )
    )]
    pub first_name: String,

    #[validate(
        length(min = 1, max = 100, message = "lastName must be between 1 and 100 characters"),
        custom(
            function = validate_person_name,
            message = "lastName may only contain letters, spaces, hyphens and apostrophes"
        )
    )]
    pub last_name: String,

    #[schema(value_type = Uuid)]
    pub class_id: Uuid,

    /// 1 or 2; treated as 1 when omitted.
    #[validate(range(min = 1, max = 2, message = "gender must be 1 or 2"))]
    pub gender: Option<i16>,

    #[validate(custom(
        function = validate_day_of_birth,
        message = "dayOfBirth must use the dd/mm/yyyy format"
    ))]
    pub day_of_birth: Option<String>,

    #[schema(value_type = Option<String>, format = Binary)]
    pub avatar: Option<AvatarUpload>,
}

fn validate_person_name(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let ok = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'');

    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("person_name"))
    }
}

fn validate_day_of_birth(value: &str) -> Result<(), ValidationError> {
    if NaiveDate::parse_from_str(value, "%d/%m/%Y").is_err() {
        return Err(ValidationError::new("day_of_birth"));
    }
    Ok(())
}

impl StudentForm {
    /// Reads the multipart body field by field. Unknown fields are ignored;
    /// missing required fields and malformed values reject with 400 before
    /// validation proper runs.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut first_name = None;
        let mut last_name = None;
        let mut class_id = None;
        let mut gender = None;
        let mut day_of_birth = None;
        let mut avatar = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::bad_request(anyhow!("Malformed multipart body: {}", e)))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "firstName" => first_name = Some(read_text(&name, field).await?),
                "lastName" => last_name = Some(read_text(&name, field).await?),
                "classId" => class_id = Some(read_text(&name, field).await?),
                "gender" => {
                    let raw = read_text(&name, field).await?;
                    if !raw.trim().is_empty() {
                        gender = Some(raw.trim().parse::<i16>().map_err(|_| {
                            AppError::bad_request(anyhow!("gender must be 1 or 2"))
                        })?);
                    }
                }
                "dayOfBirth" => {
                    let raw = read_text(&name, field).await?;
                    if !raw.trim().is_empty() {
                        day_of_birth = Some(raw.trim().to_string());
                    }
                }
                "avatar" => {
                    let file_name = field.file_name().map(str::to_string);
                    let content = field.bytes().await.map_err(|e| {
                        AppError::bad_request(anyhow!("Failed to read avatar upload: {}", e))
                    })?;

                    if let Some(file_name) = file_name {
                        if !content.is_empty() {
                            avatar = Some(AvatarUpload { file_name, content });
                        }
                    }
                }
                _ => {}
            }
        }

        let class_id = class_id
            .ok_or_else(|| AppError::bad_request(anyhow!("classId is required")))
            .and_then(|raw| {
                Uuid::parse_str(raw.trim())
                    .map_err(|_| AppError::bad_request(anyhow!("Invalid classId format")))
            })?;

        Ok(Self {
            first_name: first_name
                .ok_or_else(|| AppError::bad_request(anyhow!("firstName is required")))?,
            last_name: last_name
                .ok_or_else(|| AppError::bad_request(anyhow!("lastName is required")))?,
            class_id,
            gender,
            day_of_birth,
            avatar,
        })
    }
}

async fn read_text(
    name: &str,
    field: axum::extract::multipart::Field<'_>,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::bad_request(anyhow!("Failed to read field {}: {}", name, e)))
}

/// Query parameters for the student listing: pagination plus an optional
/// class filter.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StudentQueryParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page_size: Option<i64>,
    /// Restrict the listing to one class. Empty means unfiltered.
    pub class_id: Option<String>,
}

impl StudentQueryParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn class_id(&self) -> Result<Option<Uuid>, AppError> {
        match self.class_id.as_deref() {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => Uuid::parse_str(s.trim())
                .map(Some)
                .map_err(|_| AppError::bad_request(anyhow!("Invalid classId format"))),
        }
    }
}

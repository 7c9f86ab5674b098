use anyhow::anyhow;
use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::classes::service::ClassService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::file_storage::StorageError;
use crate::utils::response::{ApiResponse, ListResponse};
use crate::validator::first_validation_error;

use super::model::{Student, StudentForm, StudentQueryParams};
use super::service::StudentService;

fn parse_student_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::bad_request(anyhow!("Invalid student id")))
}

fn storage_error(e: StorageError) -> AppError {
    if e.is_client_error() {
        AppError::bad_request(e)
    } else {
        AppError::internal(e)
    }
}

/// Rejects forms whose class reference does not name an active class.
async fn check_class_reference(state: &AppState, class_id: Uuid) -> Result<(), AppError> {
    if !ClassService::exists(&state.db, class_id).await? {
        return Err(AppError::bad_request(anyhow!("Class does not exist")));
    }
    Ok(())
}

/// Create a student from a multipart form with an optional avatar image
#[utoipa::path(
    post,
    path = "/api/students",
    request_body(content = StudentForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Student created", body = ApiResponse<Student>),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn create_student(
    State(state): State<AppState>,
    _auth: AuthUser,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Student>>, AppError> {
    let form = StudentForm::from_multipart(multipart).await?;

    form.validate()
        .map_err(|e| AppError::bad_request(anyhow!("{}", first_validation_error(&e))))?;

    check_class_reference(&state, form.class_id).await?;

    let avatar = match &form.avatar {
        Some(upload) => Some(
            state
                .uploads
                .save_avatar(&upload.file_name, &upload.content)
                .await
                .map_err(storage_error)?,
        ),
        None => None,
    };

    let student = StudentService::create_student(&state.db, &form, avatar).await?;

    Ok(Json(ApiResponse::with_message(
        "Student added successfully",
        student,
    )))
}

/// List students, paginated and optionally filtered by class
#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentQueryParams),
    responses(
        (status = 200, description = "Paginated student listing", body = ListResponse<Student>),
        (status = 400, description = "Malformed classId filter", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn get_students(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<StudentQueryParams>,
) -> Result<Json<ListResponse<Student>>, AppError> {
    let class_id = params.class_id()?;
    let pagination = params.pagination();

    let (students, total) = StudentService::get_students(
        &state.db,
        class_id,
        pagination.page_size(),
        pagination.offset(),
    )
    .await?;

    Ok(Json(ListResponse::new(
        total,
        pagination.page(),
        pagination.page_size(),
        students,
    )))
}

/// Fetch a single student by id
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student details", body = ApiResponse<Student>),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn get_student(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Student>>, AppError> {
    let id = parse_student_id(&id)?;
    let student = StudentService::get_student(&state.db, id).await?;

    Ok(Json(ApiResponse::with_message(
        "Student retrieved successfully",
        student,
    )))
}

/// Update a student (full overwrite, optional avatar replacement)
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student id")),
    request_body(content = StudentForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Student updated", body = ApiResponse<Student>),
        (status = 400, description = "Validation failure or malformed id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn update_student(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Student>>, AppError> {
    let id = parse_student_id(&id)?;
    let form = StudentForm::from_multipart(multipart).await?;

    form.validate()
        .map_err(|e| AppError::bad_request(anyhow!("{}", first_validation_error(&e))))?;

    let existing = StudentService::get_student(&state.db, id).await?;

    check_class_reference(&state, form.class_id).await?;

    let avatar = match &form.avatar {
        Some(upload) => {
            let key = state
                .uploads
                .save_avatar(&upload.file_name, &upload.content)
                .await
                .map_err(storage_error)?;

            // the replaced image is unreachable once the record points at
            // the new key; removal is best-effort
            if let Some(old) = &existing.avatar {
                let _ = state.uploads.delete(old).await;
            }

            Some(key)
        }
        None => existing.avatar.clone(),
    };

    let student = StudentService::update_student(&state.db, id, &form, avatar).await?;

    Ok(Json(ApiResponse::with_message(
        "Student updated successfully",
        student,
    )))
}

/// Soft-delete a student
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn delete_student(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_student_id(&id)?;
    StudentService::delete_student(&state.db, id).await?;

    Ok(Json(ApiResponse::message("Student deleted successfully")))
}

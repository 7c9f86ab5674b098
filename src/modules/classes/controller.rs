use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationParams;
use crate::utils::response::{ApiResponse, ListResponse};
use crate::validator::first_validation_error;

use super::model::{Class, ClassDto};
use super::service::ClassService;

fn parse_class_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::bad_request(anyhow!("Invalid class id")))
}

/// List classes, paginated
#[utoipa::path(
    get,
    path = "/api/classes",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated class listing", body = ListResponse<Class>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip_all)]
pub async fn get_classes(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ListResponse<Class>>, AppError> {
    let (classes, total) =
        ClassService::get_classes(&state.db, params.page_size(), params.offset()).await?;

    Ok(Json(ListResponse::new(
        total,
        params.page(),
        params.page_size(),
        classes,
    )))
}

/// Fetch a single class by id
#[utoipa::path(
    get,
    path = "/api/classes/{id}",
    params(("id" = String, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class details", body = ApiResponse<Class>),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip_all)]
pub async fn get_class(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Class>>, AppError> {
    let id = parse_class_id(&id)?;
    let class = ClassService::get_class(&state.db, id).await?;

    Ok(Json(ApiResponse::with_message(
        "Class retrieved successfully",
        class,
    )))
}

/// Create a class
#[utoipa::path(
    post,
    path = "/api/classes",
    request_body = ClassDto,
    responses(
        (status = 200, description = "Class created", body = ApiResponse<Class>),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip_all)]
pub async fn create_class(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(dto): Json<ClassDto>,
) -> Result<Json<ApiResponse<Class>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(anyhow!("{}", first_validation_error(&e))))?;

    let class = ClassService::create_class(&state.db, dto).await?;

    Ok(Json(ApiResponse::with_message(
        "Class added successfully",
        class,
    )))
}

/// Update a class (full overwrite of mutable fields)
#[utoipa::path(
    put,
    path = "/api/classes/{id}",
    params(("id" = String, Path, description = "Class id")),
    request_body = ClassDto,
    responses(
        (status = 200, description = "Class updated", body = ApiResponse<Class>),
        (status = 400, description = "Validation failure or malformed id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip_all)]
pub async fn update_class(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(dto): Json<ClassDto>,
) -> Result<Json<ApiResponse<Class>>, AppError> {
    let id = parse_class_id(&id)?;

    dto.validate()
        .map_err(|e| AppError::bad_request(anyhow!("{}", first_validation_error(&e))))?;

    let class = ClassService::update_class(&state.db, id, dto).await?;

    Ok(Json(ApiResponse::with_message(
        "Class updated successfully",
        class,
    )))
}

/// Soft-delete a class
#[utoipa::path(
    delete,
    path = "/api/classes/{id}",
    params(("id" = String, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class deleted"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip_all)]
pub async fn delete_class(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_class_id(&id)?;
    ClassService::delete_class(&state.db, id).await?;

    Ok(Json(ApiResponse::message("Class deleted successfully")))
}

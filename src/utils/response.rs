use serde::Serialize;
use utoipa::ToSchema;

/// Envelope for mutation and lookup endpoints: `{code, message?, data?}`.
///
/// `code` is 1 on success; error responses carry `code: 0` and are produced
/// by [`crate::utils::errors::AppError`].
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub code: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            code: 1,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: 1,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: 1,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Envelope for paginated listings.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub page_size: i64,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    /// `total_pages` is `ceil(total_items / page_size)`; `page_size` is
    /// always positive by the time it gets here (see `PaginationParams`).
    pub fn new(total_items: i64, current_page: i64, page_size: i64, data: Vec<T>) -> Self {
        Self {
            total_items,
            total_pages: (total_items + page_size - 1) / page_size,
            current_page,
            page_size,
            data,
        }
    }
}

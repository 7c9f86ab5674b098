use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Claims carried by issued tokens: subject (username), a unique token id,
/// issue time and expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub jti: String,
    pub iat: usize,
    pub exp: usize,
}

/// Login request body: `{Username, Password}`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::modules::auth::model::Claims;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor gating protected handlers behind bearer-token verification.
///
/// Handlers that take an `AuthUser` argument never run for requests whose
/// token is missing, malformed, expired or signed with the wrong key; the
/// rejection carries 401 and the `{code: 0, message}` envelope.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The authenticated subject (username).
    pub fn username(&self) -> &str {
        &self.0.sub
    }

    /// The unique id minted for this token at issuance.
    pub fn token_id(&self) -> &str {
        &self.0.jti
    }
}

/// Strips the `Bearer ` scheme from an Authorization header value.
/// Anything without that exact prefix is not a bearer credential.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!(
                    "Missing or invalid authorization header"
                ))
            })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_extracts_after_prefix() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn bearer_token_rejects_other_schemes() {
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("bearer lowercase"), None);
        assert_eq!(bearer_token("Token xyz"), None);
        assert_eq!(bearer_token(""), None);
    }

    #[test]
    fn bearer_token_requires_the_trailing_space() {
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearerabc"), None);
    }

    #[test]
    fn auth_user_exposes_claims() {
        let auth = AuthUser(Claims {
            sub: "alice".to_string(),
            jti: "token-id".to_string(),
            iat: 1234567890,
            exp: 9999999999,
        });

        assert_eq!(auth.username(), "alice");
        assert_eq!(auth.token_id(), "token-id");
    }
}

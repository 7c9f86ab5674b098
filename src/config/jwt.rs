use std::env;

/// Token signing configuration. The secret is injected from the
/// environment so it never lives at a call site.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Seconds from issuance until a token expires.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
        }
    }
}

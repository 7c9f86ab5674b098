use axum::http::StatusCode;
use uuid::Uuid;

use rollbook::config::jwt::JwtConfig;
use rollbook::utils::jwt::{create_access_token, verify_token};

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();

    let result = create_access_token("alice", &jwt_config);

    assert!(result.is_ok());
    let token = result.unwrap();
    assert!(!token.is_empty());
}

#[test]
fn test_verify_token_success() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token("alice", &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, "alice");
    assert!(Uuid::parse_str(&claims.jti).is_ok());
}

#[test]
fn test_token_expiry_is_set() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token("alice", &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert!(claims.exp > claims.iat);
    assert_eq!(
        claims.exp - claims.iat,
        jwt_config.access_token_expiry as usize
    );
}

#[test]
fn test_each_token_gets_a_fresh_id() {
    let jwt_config = get_test_jwt_config();

    let token1 = create_access_token("alice", &jwt_config).unwrap();
    let token2 = create_access_token("alice", &jwt_config).unwrap();

    assert_ne!(token1, token2);

    let claims1 = verify_token(&token1, &jwt_config).unwrap();
    let claims2 = verify_token(&token2, &jwt_config).unwrap();
    assert_ne!(claims1.jti, claims2.jti);
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token("alice", &jwt_config).unwrap();

    let wrong_jwt_config = JwtConfig {
        secret: "different_secret_key".to_string(),
        access_token_expiry: 3600,
    };

    let result = verify_token(&token, &wrong_jwt_config);

    assert!(result.is_err());
    let err = result.unwrap_err();
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.error.to_string(), "Invalid token");
}

#[test]
fn test_verify_token_expired() {
    let expired_config = JwtConfig {
        secret: get_test_jwt_config().secret,
        access_token_expiry: -120,
    };
    let token = create_access_token("alice", &expired_config).unwrap();

    let result = verify_token(&token, &expired_config);

    assert!(result.is_err());
    let err = result.unwrap_err();
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.error.to_string(), "Token has expired");
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();
    let malformed_tokens = vec![
        "",
        "not.enough.parts",
        "too.many.parts.here.extra",
        "!!!.invalid.chars",
        "header.payload.",
        ".payload.signature",
    ];

    for token in malformed_tokens {
        let result = verify_token(token, &jwt_config);
        assert!(result.is_err(), "token {:?} should not verify", token);
        assert_eq!(result.unwrap_err().error.to_string(), "Invalid token");
    }
}

#[test]
fn test_token_rejection_does_not_leak_contents() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token("top-secret-subject", &jwt_config).unwrap();

    let wrong_jwt_config = JwtConfig {
        secret: "different_secret_key".to_string(),
        access_token_expiry: 3600,
    };

    let err = verify_token(&token, &wrong_jwt_config).unwrap_err();
    assert!(!err.error.to_string().contains("top-secret-subject"));
    assert!(!err.error.to_string().contains(&token));
}

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use http_body_util::BodyExt;
use tower::ServiceExt;

use rollbook::config::jwt::JwtConfig;
use rollbook::middleware::auth::AuthUser;
use rollbook::router::init_router;
use rollbook::utils::jwt::create_access_token;

use common::{test_jwt_config, test_state};

async fn whoami(auth: AuthUser) -> String {
    auth.username().to_string()
}

/// A protected route whose handler never touches the database, so a 200
/// proves the gate passed and a 401 proves it rejected.
fn protected_app() -> Router {
    Router::new()
        .route("/protected", get(whoami))
        .with_state(test_state())
}

fn get_request(uri: &str, auth_header: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = auth_header {
        builder = builder.header("authorization", value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_header_is_rejected_before_business_logic() {
    let app = init_router(test_state());

    let response = app
        .oneshot(get_request("/api/students", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["message"], "Missing or invalid authorization header");
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() {
    let app = init_router(test_state());

    let response = app
        .oneshot(get_request("/api/classes", Some("Basic dXNlcjpwYXNz")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Missing or invalid authorization header");
}

#[tokio::test]
async fn malformed_token_is_rejected_as_invalid() {
    let app = init_router(test_state());

    let response = app
        .oneshot(get_request("/api/students", Some("Bearer not.a.token")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn token_signed_with_wrong_key_is_rejected() {
    let wrong_config = JwtConfig {
        secret: "a_completely_different_secret_key".to_string(),
        access_token_expiry: 3600,
    };
    let token = create_access_token("intruder", &wrong_config).unwrap();

    let app = init_router(test_state());
    let response = app
        .oneshot(get_request(
            "/api/students",
            Some(&format!("Bearer {}", token)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn expired_token_is_rejected_with_distinct_message() {
    let expired_config = JwtConfig {
        secret: test_jwt_config().secret,
        access_token_expiry: -120,
    };
    let token = create_access_token("latecomer", &expired_config).unwrap();

    let app = init_router(test_state());
    let response = app
        .oneshot(get_request(
            "/api/students",
            Some(&format!("Bearer {}", token)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Token has expired");
}

#[tokio::test]
async fn valid_token_reaches_the_handler() {
    let token = create_access_token("alice", &test_jwt_config()).unwrap();

    let response = protected_app()
        .oneshot(get_request(
            "/protected",
            Some(&format!("Bearer {}", token)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"alice");
}

#[tokio::test]
async fn mutating_routes_are_gated_too() {
    let app = init_router(test_state());

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/students/00000000-0000-0000-0000-000000000000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_is_not_gated_but_validates_its_body() {
    let app = init_router(test_state());

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"Username":"","Password":"secret"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["message"], "Username is required");
}

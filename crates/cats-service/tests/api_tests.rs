//! Integration tests for the cats service API.

use account_store::Store;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use cats_service::{
    api::{create_router, AppState},
    RegistrationSettings,
};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

/// Cheapest bcrypt cost, so tests stay fast.
fn test_settings() -> RegistrationSettings {
    RegistrationSettings {
        bcrypt_cost: 4,
        timeout: Duration::from_secs(5),
    }
}

/// Create a test app with memory-only storage.
fn create_test_app() -> Router {
    create_router(AppState::new(Store::memory(), test_settings()))
}

fn sign_up_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/cats")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["accounts"], 0);
}

#[tokio::test]
async fn test_sign_up_returns_public_view() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(sign_up_request(
            r#"{"email": "a@x.com", "name": "A", "password": "pw1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["email"], "a@x.com");
    assert_eq!(json["name"], "A");
    assert_eq!(json["id"].as_str().unwrap().len(), 24);

    let fields = json.as_object().unwrap();
    assert_eq!(fields.len(), 3);
    assert!(!json.to_string().contains("pw1"));
    assert!(!json.to_string().contains("$2"));

    let health = body_json(app.oneshot(get_request("/health")).await.unwrap()).await;
    assert_eq!(health["accounts"], 1);
}

#[tokio::test]
async fn test_duplicate_sign_up_is_bad_request() {
    let app = create_test_app();

    let first = app
        .clone()
        .oneshot(sign_up_request(
            r#"{"email": "a@x.com", "name": "A", "password": "pw1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .clone()
        .oneshot(sign_up_request(
            r#"{"email": "a@x.com", "name": "A2", "password": "pw2"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let json = body_json(second).await;
    assert_eq!(json["code"], "DUPLICATE_ACCOUNT");
    assert!(json["error"].as_str().unwrap().contains("a@x.com"));

    let health = body_json(app.oneshot(get_request("/health")).await.unwrap()).await;
    assert_eq!(health["accounts"], 1);
}

#[tokio::test]
async fn test_missing_field_is_validation_error() {
    let app = create_test_app();

    let response = app
        .oneshot(sign_up_request(r#"{"email": "a@x.com", "name": "A"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn test_blank_field_is_validation_error() {
    let app = create_test_app();

    let response = app
        .oneshot(sign_up_request(
            r#"{"email": "   ", "name": "A", "password": "pw1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = create_test_app();

    let response = app.oneshot(sign_up_request("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_route_returns_not_found_envelope() {
    let app = create_test_app();

    let response = app.oneshot(get_request("/cats/blue")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "404 not found error");
}

#[tokio::test]
async fn test_file_store_persists_across_apps() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cats.json");

    let app = create_router(AppState::new(
        Store::file(&path).await.unwrap(),
        test_settings(),
    ));
    let response = app
        .oneshot(sign_up_request(
            r#"{"email": "a@x.com", "name": "A", "password": "pw1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // A fresh app over the same file sees the account.
    let app = create_router(AppState::new(
        Store::file(&path).await.unwrap(),
        test_settings(),
    ));
    let response = app
        .oneshot(sign_up_request(
            r#"{"email": "a@x.com", "name": "A2", "password": "pw2"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_write_failure_is_service_unavailable() {
    let dir = TempDir::new().unwrap();
    let parent = dir.path().join("data");
    let store = Store::file(parent.join("cats.json")).await.unwrap();
    // Block the data directory so the store cannot write.
    std::fs::write(&parent, b"not a directory").unwrap();

    let app = create_router(AppState::new(store, test_settings()));

    let response = app
        .clone()
        .oneshot(sign_up_request(
            r#"{"email": "a@x.com", "name": "A", "password": "pw1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "STORE_UNAVAILABLE");

    let health = body_json(app.oneshot(get_request("/health")).await.unwrap()).await;
    assert_eq!(health["accounts"], 0);
}

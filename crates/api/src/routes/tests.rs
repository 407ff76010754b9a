//! Router tests for paths that never reach the database.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::AUTHORIZATION, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use moneta_shared::JwtService;
use moneta_shared::config::{ImportConfig, JwtConfig};
use moneta_shared::types::UserId;

use crate::{AppState, create_router};

const BOUNDARY: &str = "MONETA_BOUNDARY";

fn test_state(max_upload_bytes: usize) -> AppState {
    AppState {
        db: Arc::new(DatabaseConnection::Disconnected),
        jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
        import: ImportConfig { max_upload_bytes },
    }
}

fn app(state: &AppState) -> Router {
    create_router(state.clone())
}

fn token(state: &AppState, user_id: UserId) -> String {
    state
        .jwt_service
        .generate_token(user_id.into_inner(), "Ana")
        .expect("should generate token")
}

fn multipart_body(field: &str, file_name: &str, contents: &str) -> String {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: text/csv\r\n\r\n{contents}\r\n--{BOUNDARY}--\r\n"
    )
}

fn import_request(user_id: UserId, bearer: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/v1/users/{user_id}/entries/import"))
        .header(AUTHORIZATION, format!("Bearer {bearer}"))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health() {
    let state = test_state(1024);
    let response = app(&state)
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let state = test_state(1024);
    let response = app(&state)
        .oneshot(
            Request::builder()
                .uri("/api/v1/entries")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["error"], "MISSING_TOKEN");
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let state = test_state(1024);
    let response = app(&state)
        .oneshot(
            Request::builder()
                .uri("/api/v1/categories")
                .header(AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["error"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_balance_of_another_user_is_forbidden() {
    let state = test_state(1024);
    let bearer = token(&state, UserId::new());

    let response = app(&state)
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/users/{}/balance", UserId::new()))
                .header(AUTHORIZATION, format!("Bearer {bearer}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_import_without_file_field() {
    let state = test_state(1024);
    let me = UserId::new();
    let bearer = token(&state, me);

    let body = multipart_body("attachment", "june.csv", "descricao,mes");
    let response = app(&state)
        .oneshot(import_request(me, &bearer, body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "MISSING_FILE");
}

#[tokio::test]
async fn test_oversized_import_is_rejected() {
    let state = test_state(256);
    let me = UserId::new();
    let bearer = token(&state, me);

    let contents = "Rent,6,2024,1500.00,DESPESA,,,Moradia\n".repeat(50);
    let response = app(&state)
        .oneshot(import_request(me, &bearer, multipart_body("file", "june.csv", &contents)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = json_body(response).await;
    assert_eq!(
        json["message"],
        "Maximum upload size exceeded; the limit is 256 bytes."
    );
}

#[tokio::test]
async fn test_import_for_another_user_is_forbidden() {
    let state = test_state(1024);
    let bearer = token(&state, UserId::new());

    let body = multipart_body("file", "june.csv", "descricao");
    let response = app(&state)
        .oneshot(import_request(UserId::new(), &bearer, body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

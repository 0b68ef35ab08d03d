//! Tests for the `AppError` response mapping and role enforcement.
//!
//! The mapping tests call `IntoResponse` directly; the enforcement tests go
//! through the full router.

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{admin_token, error_message, get, get_auth, post_json_auth};
use http_body_util::BodyExt;
use scholaris_api::error::AppError;
use scholaris_core::error::CoreError;
use scholaris_db::repositories::DepartmentRepo;
use sqlx::PgPool;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Subject",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"][0], "Subject with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("score out of range".into()));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"][0], "score out of range");
}

#[tokio::test]
async fn forbidden_error_returns_403() {
    let err = AppError::Core(CoreError::forbidden("A term is already active"));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"][0], "A term is already active");
}

/// Internal errors never leak their message to the client.
#[tokio::test]
async fn internal_error_is_sanitized() {
    let err = AppError::InternalError("connection string with password".into());

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"][0], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Role enforcement over HTTP
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/years").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_garbage_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/years", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Teachers cannot reach admin-level listings.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_teacher_cannot_list_years(pool: PgPool) {
    let department = DepartmentRepo::create(&pool, "Sciences").await.unwrap();
    let (_teacher, token) = common::create_teacher(&pool, "mathteacher", department.id).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/years", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Admins cannot perform superuser mutations.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_cannot_create_year(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "2026/2027" });
    let response = post_json_auth(app, "/api/v1/years", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Unique-constraint violations surface as 403, like every other business
/// rule, not as 409 or 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_department_name_is_403(pool: PgPool) {
    let token = common::superuser_token(&pool).await;
    DepartmentRepo::create(&pool, "Sciences").await.unwrap();
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "Sciences" });
    let response = post_json_auth(app, "/api/v1/departments", body, &token).await;
    let message = error_message(response, StatusCode::FORBIDDEN).await;
    assert!(message.contains("uq_departments_name"), "got: {message}");
}

//! HTTP-level integration tests for login, refresh, and logout.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, post_json_auth, TEST_PASSWORD};
use scholaris_core::roles::ROLE_SUPERUSER;
use sqlx::PgPool;

/// Log in via the API and return the parsed JSON response.
async fn login(app: axum::Router, identifier: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "identifier": identifier, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Login works with the phone number as identifier.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_with_phone(pool: PgPool) {
    let account = common::create_account(&pool, "principal", ROLE_SUPERUSER).await;
    let app = common::build_test_app(pool);

    let json = login(app, &account.phone, TEST_PASSWORD).await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["account"]["id"], account.id);
    assert_eq!(json["account"]["role"], "superuser");
    // The password hash must never appear in a response.
    assert!(json["account"].get("password_hash").is_none());
}

/// Login also works with the email as identifier.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_with_email(pool: PgPool) {
    let account = common::create_account(&pool, "principal", ROLE_SUPERUSER).await;
    let app = common::build_test_app(pool);

    let json = login(app, &account.email, TEST_PASSWORD).await;
    assert_eq!(json["account"]["email"], account.email);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let account = common::create_account(&pool, "principal", ROLE_SUPERUSER).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "identifier": account.phone, "password": "incorrect" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_identifier(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "identifier": "ghost@test.com", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A deactivated account cannot log in even with the right password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_deactivated_account(pool: PgPool) {
    let account = common::create_account(&pool, "principal", ROLE_SUPERUSER).await;
    sqlx::query("UPDATE accounts SET is_active = FALSE WHERE id = $1")
        .bind(account.id)
        .execute(&pool)
        .await
        .expect("deactivation should succeed");
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "identifier": account.phone, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Refreshing rotates the refresh token and invalidates the old one.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_rotates_token(pool: PgPool) {
    let account = common::create_account(&pool, "principal", ROLE_SUPERUSER).await;

    let app = common::build_test_app(pool.clone());
    let json = login(app, &account.phone, TEST_PASSWORD).await;
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let refreshed = body_json(response).await;
    assert_ne!(refreshed["refresh_token"].as_str().unwrap(), refresh_token);

    // The consumed token is dead.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_with_garbage_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "refresh_token": "not-a-real-token" });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes every session of the account.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_sessions(pool: PgPool) {
    let account = common::create_account(&pool, "principal", ROLE_SUPERUSER).await;

    let app = common::build_test_app(pool.clone());
    let json = login(app, &account.phone, TEST_PASSWORD).await;
    let access_token = json["access_token"].as_str().unwrap().to_string();
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/auth/logout",
        serde_json::json!({}),
        &access_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The refresh token issued at login no longer works.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

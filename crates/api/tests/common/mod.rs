//! Shared harness for the HTTP-level integration tests.
//!
//! `build_test_app` goes through [`scholaris_api::router::build_app_router`],
//! so every test exercises the same middleware stack the binary ships with.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use scholaris_api::auth::jwt::{generate_access_token, JwtConfig};
use scholaris_api::auth::password::hash_password;
use scholaris_api::config::ServerConfig;
use scholaris_api::router::build_app_router;
use scholaris_api::state::AppState;
use scholaris_core::roles::{ROLE_ADMIN, ROLE_SUPERUSER};
use scholaris_db::models::account::Account;
use scholaris_db::models::student::CreateStudent;
use scholaris_db::models::teacher::Teacher;
use scholaris_db::repositories::{
    AccountRepo, SchoolClassRepo, SequenceRepo, StudentRepo, TeacherRepo, TermRepo, YearRepo,
};

/// Build a test `ServerConfig` with a fixed JWT secret and safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        school_initials: "FAS".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router over the given pool, with the same
/// middleware stack as production.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// PUT with no request body, for the lifecycle and assignment endpoints.
pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the standard `{"error": [message]}` failure shape and return the
/// first message.
pub async fn error_message(response: Response<Body>, expected: StatusCode) -> String {
    assert_eq!(response.status(), expected);
    let json = body_json(response).await;
    let errors = json["error"].as_array().expect("error body must be an array");
    errors[0].as_str().expect("error message must be a string").to_string()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Monotonic counter so every seeded account gets a distinct phone number.
static PHONE_SEQ: std::sync::atomic::AtomicU32 = std::sync::atomic::AtomicU32::new(0);

fn next_phone() -> String {
    let n = PHONE_SEQ.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    format!("69{n:07}")
}

/// Create an account with the given role directly in the database.
pub async fn create_account(pool: &PgPool, name: &str, role: &str) -> Account {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    AccountRepo::create(
        pool,
        name,
        &format!("{name}@test.com"),
        &next_phone(),
        "Male",
        &hashed,
        role,
    )
    .await
    .expect("account creation should succeed")
}

/// Mint an access token for an account without going through `/auth/login`.
pub fn token_for(account: &Account) -> String {
    generate_access_token(account.id, &account.role, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Create a superuser account and return its access token.
pub async fn superuser_token(pool: &PgPool) -> String {
    let account = create_account(pool, "head", ROLE_SUPERUSER).await;
    token_for(&account)
}

/// Create an admin account and return its access token.
pub async fn admin_token(pool: &PgPool) -> String {
    let account = create_account(pool, "bursar", ROLE_ADMIN).await;
    token_for(&account)
}

/// Create a department with a teacher in it and return the teacher plus an
/// access token for them.
pub async fn create_teacher(pool: &PgPool, name: &str, department_id: i64) -> (Teacher, String) {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let teacher = TeacherRepo::create(
        pool,
        department_id,
        name,
        &format!("{name}@test.com"),
        &next_phone(),
        "Female",
        None,
        None,
        &hashed,
    )
    .await
    .expect("teacher creation should succeed");
    let account = AccountRepo::find_by_id(pool, teacher.account_id)
        .await
        .expect("account lookup should succeed")
        .expect("teacher account must exist");
    let token = token_for(&account);
    (teacher, token)
}

/// Seed the running calendar: an active year, term, and sequence.
pub async fn seed_active_calendar(
    pool: &PgPool,
) -> (
    scholaris_db::models::year::Year,
    scholaris_db::models::term::Term,
    scholaris_db::models::sequence::Sequence,
) {
    let year = YearRepo::create(pool, "2026/2027")
        .await
        .expect("year creation should succeed");
    let term = TermRepo::create(pool, year.id, "First Term")
        .await
        .expect("term creation should succeed");
    let sequence = SequenceRepo::create(pool, term.id, "First Sequence", "SEQ 1")
        .await
        .expect("sequence creation should succeed");
    (year, term, sequence)
}

/// Create a class in the given year.
pub async fn create_class(
    pool: &PgPool,
    year_id: i64,
    name: &str,
) -> scholaris_db::models::school_class::SchoolClass {
    SchoolClassRepo::create(pool, year_id, name, name, "Ordinary")
        .await
        .expect("class creation should succeed")
}

/// Enrol a student directly, bypassing the id generator.
pub async fn create_student(
    pool: &PgPool,
    class_id: i64,
    name: &str,
    student_id: &str,
    gender: &str,
) -> scholaris_db::models::student::Student {
    let input = CreateStudent {
        name: name.to_string(),
        gender: gender.to_string(),
        date_of_birth: chrono::NaiveDate::from_ymd_opt(2012, 5, 14).unwrap(),
        place_of_birth: None,
        address: None,
        parent_name: None,
        parent_phone: "677000000".to_string(),
        is_repeater: false,
    };
    StudentRepo::create(pool, class_id, student_id, &input)
        .await
        .expect("student creation should succeed")
}

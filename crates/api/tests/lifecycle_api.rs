//! Integration tests for the academic calendar lifecycle: years, terms,
//! and sequences, including the single-active invariants and the closing
//! preconditions.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, error_message, get_auth, post_json_auth, put_auth, put_json_auth, superuser_token,
};
use scholaris_db::repositories::{SequenceRepo, TermRepo, YearRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_created_year_is_active(pool: PgPool) {
    let token = superuser_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "2026/2027" });
    let response = post_json_auth(app, "/api/v1/years", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["name"], "2026/2027");
    assert_eq!(json["status"], "active");
}

/// Only one year may be active at a time.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_second_active_year_is_forbidden(pool: PgPool) {
    let token = superuser_token(&pool).await;
    YearRepo::create(&pool, "2026/2027").await.unwrap();
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "2027/2028" });
    let response = post_json_auth(app, "/api/v1/years", body, &token).await;
    let message = error_message(response, StatusCode::FORBIDDEN).await;
    assert_eq!(message, "An academic year is already active");
}

/// Terms can only be created under an active year.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_term_requires_active_year(pool: PgPool) {
    let token = superuser_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "First Term" });
    let response = post_json_auth(app, "/api/v1/terms", body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_second_active_term_is_forbidden(pool: PgPool) {
    let token = superuser_token(&pool).await;
    let year = YearRepo::create(&pool, "2026/2027").await.unwrap();
    TermRepo::create(&pool, year.id, "First Term").await.unwrap();
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "Second Term" });
    let response = post_json_auth(app, "/api/v1/terms", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Sequences can only be created under an active term.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sequence_requires_active_term(pool: PgPool) {
    let token = superuser_token(&pool).await;
    YearRepo::create(&pool, "2026/2027").await.unwrap();
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "First Sequence", "short_name": "SEQ 1" });
    let response = post_json_auth(app, "/api/v1/sequences", body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// A term cannot close until it has at least two sequences.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_close_term_requires_two_sequences(pool: PgPool) {
    let token = superuser_token(&pool).await;
    let (_year, term, _sequence) = common::seed_active_calendar(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = put_auth(app, "/api/v1/terms/deactivate", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Close the first sequence, add a second, and the term can go.
    let seq = SequenceRepo::find_active(&pool).await.unwrap().unwrap();
    SequenceRepo::close(&pool, seq.id).await.unwrap();
    SequenceRepo::create(&pool, term.id, "Second Sequence", "SEQ 2")
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_auth(app, "/api/v1/terms/deactivate", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "closed");

    // Closing the term cascades to its sequences.
    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/terms/{}/sequences", term.id), &token).await;
    let json = body_json(response).await;
    for sequence in json.as_array().unwrap() {
        assert_eq!(sequence["status"], "closed");
    }
}

/// A year cannot close before three terms and six sequences exist.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_close_year_requires_full_calendar(pool: PgPool) {
    let token = superuser_token(&pool).await;
    common::seed_active_calendar(&pool).await;
    let app = common::build_test_app(pool);

    let response = put_auth(app, "/api/v1/years/deactivate", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Only a closed year can be deleted; the active one is the running record.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_year_only_when_closed(pool: PgPool) {
    let token = superuser_token(&pool).await;
    let year = YearRepo::create(&pool, "2026/2027").await.unwrap();
    let app = common::build_test_app(pool.clone());

    let response = delete_year(app, year.id, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    sqlx::query("UPDATE years SET status = 'closed' WHERE id = $1")
        .bind(year.id)
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = delete_year(app, year.id, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

async fn delete_year(
    app: axum::Router,
    year_id: i64,
    token: &str,
) -> axum::http::Response<axum::body::Body> {
    common::delete_auth(app, &format!("/api/v1/years/{year_id}"), token).await
}

/// The active sequence is renamed through `/sequences/active`, then closed
/// through `/sequences/deactivate`, after which a new one may start.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sequence_rename_and_rollover(pool: PgPool) {
    let token = superuser_token(&pool).await;
    common::seed_active_calendar(&pool).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Sequence One", "short_name": "S1" });
    let response = put_json_auth(app, "/api/v1/sequences/active", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Sequence One");

    let app = common::build_test_app(pool.clone());
    let response = put_auth(app, "/api/v1/sequences/deactivate", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "closed");

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Second Sequence", "short_name": "SEQ 2" });
    let response = post_json_auth(app, "/api/v1/sequences", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// The year listing carries the child counts.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_year_listing_overview(pool: PgPool) {
    let token = superuser_token(&pool).await;
    common::seed_active_calendar(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/years", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let years = json.as_array().unwrap();
    assert_eq!(years.len(), 1);
    assert_eq!(years[0]["terms"], 1);
    assert_eq!(years[0]["sequences"], 1);
    assert_eq!(years[0]["students"], 0);
}

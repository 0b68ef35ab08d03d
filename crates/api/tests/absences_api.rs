//! Integration tests for student attendance and teacher absences.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, get_auth, post_json_auth};
use scholaris_db::repositories::DepartmentRepo;
use sqlx::PgPool;

/// Marking, re-marking (idempotent), and clearing through the roster.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_student_roster_mark_and_clear(pool: PgPool) {
    let (year, _term, sequence) = common::seed_active_calendar(&pool).await;
    let class = common::create_class(&pool, year.id, "Form One").await;
    common::create_student(&pool, class.id, "Ada Mbia", "FAS26A001", "Female").await;
    common::create_student(&pool, class.id, "Bema Nkolo", "FAS26B002", "Male").await;
    let department = DepartmentRepo::create(&pool, "Sciences").await.unwrap();
    let (_teacher, teacher_token) = common::create_teacher(&pool, "mathteacher", department.id).await;
    let admin = admin_token(&pool).await;

    let body = serde_json::json!({
        "date": "2026-09-14",
        "class_list": [
            { "student_id": "FAS26A001", "is_absent": "true" },
            { "student_id": "FAS26B002", "is_absent": "false" },
        ],
    });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/absences/students", body.clone(), &teacher_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Re-submitting the same roster is idempotent.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/absences/students", body, &teacher_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let uri = format!(
        "/api/v1/absences/students/FAS26A001/sequences/{}",
        sequence.id
    );
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &uri, &admin).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["date"], "2026-09-14");

    // The roster view reflects the recorded absence.
    let roster_uri = format!("/api/v1/school-classes/{}/absences?date=2026-09-14", class.id);
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &roster_uri, &teacher_token).await;
    let json = body_json(response).await;
    let roster = json.as_array().unwrap();
    assert_eq!(roster[0]["student_id"], "FAS26A001");
    assert_eq!(roster[0]["is_absent"], true);
    assert_eq!(roster[1]["is_absent"], false);

    // Clearing through the roster removes the record.
    let body = serde_json::json!({
        "date": "2026-09-14",
        "class_list": [{ "student_id": "FAS26A001", "is_absent": "false" }],
    });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/absences/students", body, &teacher_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &uri, &admin).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

/// The term view aggregates absences across the term's sequences.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_student_absences_by_term(pool: PgPool) {
    let (year, term, _sequence) = common::seed_active_calendar(&pool).await;
    let class = common::create_class(&pool, year.id, "Form One").await;
    common::create_student(&pool, class.id, "Ada Mbia", "FAS26A001", "Female").await;
    let department = DepartmentRepo::create(&pool, "Sciences").await.unwrap();
    let (_teacher, teacher_token) = common::create_teacher(&pool, "mathteacher", department.id).await;
    let admin = admin_token(&pool).await;

    for date in ["2026-09-14", "2026-09-15"] {
        let body = serde_json::json!({
            "date": date,
            "class_list": [{ "student_id": "FAS26A001", "is_absent": "true" }],
        });
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(app, "/api/v1/absences/students", body, &teacher_token).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let uri = format!("/api/v1/absences/students/FAS26A001/terms/{}", term.id);
    let app = common::build_test_app(pool);
    let response = get_auth(app, &uri, &admin).await;
    let json = body_json(response).await;
    let absences = json.as_array().unwrap();
    assert_eq!(absences.len(), 2);
    // Newest first.
    assert_eq!(absences[0]["date"], "2026-09-15");
}

/// Teacher absences toggle on and off for a date.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_teacher_absence_toggle(pool: PgPool) {
    common::seed_active_calendar(&pool).await;
    let department = DepartmentRepo::create(&pool, "Sciences").await.unwrap();
    let (teacher, _token) = common::create_teacher(&pool, "mathteacher", department.id).await;
    let admin = admin_token(&pool).await;

    let uri = format!("/api/v1/absences/teachers/{}", teacher.id);

    let body = serde_json::json!({ "date": "2026-09-14", "is_absent": true });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &uri, body.clone(), &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Toggling on twice stays a single record.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &uri, body, &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &uri, &admin).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let body = serde_json::json!({ "date": "2026-09-14", "is_absent": false });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &uri, body, &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &uri, &admin).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

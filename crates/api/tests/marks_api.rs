//! Integration tests for batch mark entry, the roster, grading, and the
//! pass/fail report.

mod common;

use axum::http::StatusCode;
use chrono::NaiveTime;
use common::{admin_token, body_json, get_auth, post_json_auth, superuser_token};
use scholaris_db::models::period::CreatePeriod;
use scholaris_db::models::subject::CreateSubject;
use scholaris_db::repositories::{DepartmentRepo, PeriodRepo, SubjectRepo};
use sqlx::PgPool;

/// Everything a mark-entry test needs: an active calendar, a class with
/// two students, and a teacher holding a period for one subject.
struct MarkFixture {
    class_id: i64,
    subject_id: i64,
    teacher_token: String,
}

async fn seed_mark_fixture(pool: &PgPool) -> MarkFixture {
    let (year, _term, _sequence) = common::seed_active_calendar(pool).await;
    let class = common::create_class(pool, year.id, "Form One").await;
    common::create_student(pool, class.id, "Ada Mbia", "FAS26A001", "Female").await;
    common::create_student(pool, class.id, "Bema Nkolo", "FAS26B002", "Male").await;

    let department = DepartmentRepo::create(pool, "Sciences").await.unwrap();
    let (teacher, teacher_token) = common::create_teacher(pool, "mathteacher", department.id).await;

    let subject = SubjectRepo::create(
        pool,
        &CreateSubject {
            name: "Mathematics".to_string(),
            short_name: "MATH".to_string(),
            coefficient: 4,
            level: "Ordinary".to_string(),
        },
    )
    .await
    .unwrap();

    PeriodRepo::create(
        pool,
        class.id,
        &CreatePeriod {
            subject_id: subject.id,
            teacher_id: teacher.id,
            day: "Monday".to_string(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            number_of_periods: 2,
        },
    )
    .await
    .unwrap();

    MarkFixture {
        class_id: class.id,
        subject_id: subject.id,
        teacher_token,
    }
}

fn marks_uri(fixture: &MarkFixture) -> String {
    format!(
        "/api/v1/school-classes/{}/subjects/{}/marks",
        fixture.class_id, fixture.subject_id
    )
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_batch_submission_and_roster(pool: PgPool) {
    let fixture = seed_mark_fixture(&pool).await;

    let body = serde_json::json!({
        "class_list": [
            { "student_id": "FAS26A001", "score": "15.5" },
            { "student_id": "FAS26B002", "score": "8" },
        ],
    });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &marks_uri(&fixture), body, &fixture.teacher_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &marks_uri(&fixture), &fixture.teacher_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let roster = json.as_array().unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0]["student_id"], "FAS26A001");
    assert_eq!(roster[0]["score"], 15.5);
    assert_eq!(roster[1]["score"], 8.0);
}

/// One malformed line rejects the whole batch; nothing is written.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_score_aborts_whole_batch(pool: PgPool) {
    let fixture = seed_mark_fixture(&pool).await;

    let body = serde_json::json!({
        "class_list": [
            { "student_id": "FAS26A001", "score": "15.5" },
            { "student_id": "FAS26B002", "score": "eleven" },
        ],
    });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &marks_uri(&fixture), body, &fixture.teacher_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &marks_uri(&fixture), &fixture.teacher_token).await;
    let json = body_json(response).await;
    for line in json.as_array().unwrap() {
        assert!(line["score"].is_null(), "no mark may survive a failed batch");
    }
}

/// Scores outside 0..=20 are rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_out_of_range_score_is_rejected(pool: PgPool) {
    let fixture = seed_mark_fixture(&pool).await;

    let body = serde_json::json!({
        "class_list": [{ "student_id": "FAS26A001", "score": "20.5" }],
    });
    let app = common::build_test_app(pool);
    let response = post_json_auth(app, &marks_uri(&fixture), body, &fixture.teacher_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// An empty-string score deletes the previously recorded mark.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_score_deletes_mark(pool: PgPool) {
    let fixture = seed_mark_fixture(&pool).await;

    let body = serde_json::json!({
        "class_list": [{ "student_id": "FAS26A001", "score": "12" }],
    });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &marks_uri(&fixture), body, &fixture.teacher_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = serde_json::json!({
        "class_list": [{ "student_id": "FAS26A001", "score": "" }],
    });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &marks_uri(&fixture), body, &fixture.teacher_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &marks_uri(&fixture), &fixture.teacher_token).await;
    let json = body_json(response).await;
    assert!(json.as_array().unwrap()[0]["score"].is_null());
}

/// Only the teacher holding a period for the subject in the class may
/// enter marks.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_outsider_teacher_is_forbidden(pool: PgPool) {
    let fixture = seed_mark_fixture(&pool).await;
    let department = DepartmentRepo::create(&pool, "Letters").await.unwrap();
    let (_teacher, outsider_token) =
        common::create_teacher(&pool, "frenchteacher", department.id).await;

    let body = serde_json::json!({
        "class_list": [{ "student_id": "FAS26A001", "score": "12" }],
    });
    let app = common::build_test_app(pool);
    let response = post_json_auth(app, &marks_uri(&fixture), body, &outsider_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Scores map to grades through the evaluation table; 20 and 10 hit the
/// exact-boundary overrides.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_grading_boundaries(pool: PgPool) {
    let fixture = seed_mark_fixture(&pool).await;
    let admin = admin_token(&pool).await;

    let body = serde_json::json!({
        "class_list": [
            { "student_id": "FAS26A001", "score": "20" },
            { "student_id": "FAS26B002", "score": "10" },
        ],
    });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &marks_uri(&fixture), body, &fixture.teacher_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/students/FAS26A001/marks", &admin).await;
    let json = body_json(response).await;
    assert_eq!(json[0]["grade"], "A");
    assert_eq!(json[0]["remark"], "Excellent");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/students/FAS26B002/marks", &admin).await;
    let json = body_json(response).await;
    assert_eq!(json[0]["grade"], "C");
    assert_eq!(json[0]["remark"], "Average");
}

/// The report ranks marks best first and splits pass/fail by gender.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_pass_fail_report(pool: PgPool) {
    let fixture = seed_mark_fixture(&pool).await;
    let superuser = superuser_token(&pool).await;

    let body = serde_json::json!({
        "class_list": [
            { "student_id": "FAS26A001", "score": "15" },
            { "student_id": "FAS26B002", "score": "8" },
        ],
    });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, &marks_uri(&fixture), body, &fixture.teacher_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let sequence = scholaris_db::repositories::SequenceRepo::find_active(&pool)
        .await
        .unwrap()
        .unwrap();
    let uri = format!(
        "/api/v1/reports/classes/{}/subjects/{}/sequences/{}",
        fixture.class_id, fixture.subject_id, sequence.id
    );

    let app = common::build_test_app(pool);
    let response = get_auth(app, &uri, &superuser).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["enrolment"]["total"], 2);
    assert_eq!(json["statistics"]["passes"]["total"], 1);
    assert_eq!(json["statistics"]["fails"]["total"], 1);
    assert_eq!(json["statistics"]["pass_percentage"], 50.0);
    assert_eq!(json["statistics"]["fail_percentage"], 50.0);
    // All passes are female in this fixture.
    assert_eq!(json["statistics"]["female_pass_percentage"], 100.0);
    assert_eq!(json["statistics"]["male_pass_percentage"], 0.0);
    // Best first.
    let marks = json["marks"].as_array().unwrap();
    assert_eq!(marks[0]["student_id"], "FAS26A001");
    assert_eq!(marks[0]["score"], 15.0);
    // With 3 or fewer marks the podium and the bottom three coincide,
    // both ranked best first.
    let best_three = json["best_three"].as_array().unwrap();
    let last_three = json["last_three"].as_array().unwrap();
    assert_eq!(best_three.len(), 2);
    assert_eq!(last_three.len(), 2);
    assert_eq!(last_three[0]["student_id"], "FAS26A001");
    assert_eq!(last_three[1]["student_id"], "FAS26B002");
}

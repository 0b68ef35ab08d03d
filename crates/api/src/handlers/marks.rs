//! Handlers for mark entry and mark listings.
//!
//! Batch mark entry is atomic: the submission is validated line by line
//! first, and only a fully valid batch reaches the database, inside one
//! transaction. A single malformed or out-of-range score rejects the whole
//! request.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use scholaris_core::error::CoreError;
use scholaris_core::grading::{evaluate, round_score};
use scholaris_core::types::DbId;
use scholaris_db::models::mark::{MarkDetail, MarkEntry, MarkSubmission, MarkWrite, RosterEntry};
use scholaris_db::repositories::{MarkRepo, PeriodRepo, SubjectRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::school_classes::require_class_in_active_year;
use crate::handlers::sequences::require_active_sequence;
use crate::handlers::students::require_student;
use crate::handlers::teachers::require_own_profile;
use crate::middleware::rbac::{RequireAdmin, RequireTeacher};
use crate::state::AppState;

/// POST /api/v1/school-classes/{class_id}/subjects/{subject_id}/marks
///
/// Batch mark entry for one class, subject, and the active sequence. Each
/// line carries a student identifier and a score string: a parsable score
/// upserts, an empty string deletes any existing mark, anything else
/// aborts the batch.
pub async fn submit_batch(
    State(state): State<AppState>,
    RequireTeacher(user): RequireTeacher,
    Path((class_id, subject_id)): Path<(DbId, DbId)>,
    Json(input): Json<MarkSubmission>,
) -> AppResult<StatusCode> {
    let class = require_class_in_active_year(&state.pool, class_id).await?;
    let sequence = require_active_sequence(&state.pool).await?;

    SubjectRepo::find_by_id(&state.pool, subject_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id: subject_id,
        }))?;

    let teacher = require_own_profile(&state.pool, user.account_id).await?;
    if !PeriodRepo::teacher_teaches_subject_in_class(&state.pool, teacher.id, subject_id, class.id)
        .await?
    {
        return Err(AppError::Core(CoreError::forbidden(
            "You do not teach this subject in this class",
        )));
    }

    // Validate every line before touching the database.
    let mut writes = Vec::with_capacity(input.class_list.len());
    for entry in &input.class_list {
        writes.push(validate_entry(&state, &class, entry).await?);
    }

    MarkRepo::apply_batch(
        &state.pool,
        subject_id,
        sequence.id,
        teacher.id,
        input.competency.as_deref(),
        &writes,
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/school-classes/{class_id}/subjects/{subject_id}/marks
///
/// The mark-entry roster: every student of the class with any score
/// already recorded for the subject and active sequence.
pub async fn roster(
    State(state): State<AppState>,
    RequireTeacher(user): RequireTeacher,
    Path((class_id, subject_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Vec<RosterEntry>>> {
    let class = require_class_in_active_year(&state.pool, class_id).await?;
    let sequence = require_active_sequence(&state.pool).await?;

    let teacher = require_own_profile(&state.pool, user.account_id).await?;
    if !PeriodRepo::teacher_teaches_subject_in_class(&state.pool, teacher.id, subject_id, class.id)
        .await?
    {
        return Err(AppError::Core(CoreError::forbidden(
            "You do not teach this subject in this class",
        )));
    }

    let roster = MarkRepo::roster_for_class(&state.pool, class.id, subject_id, sequence.id).await?;
    Ok(Json(roster))
}

/// GET /api/v1/students/{student_id}/marks
///
/// One student's marks for the active sequence.
pub async fn list_for_student(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(student_id): Path<String>,
) -> AppResult<Json<Vec<MarkDetail>>> {
    let student = require_student(&state.pool, &student_id).await?;
    let sequence = require_active_sequence(&state.pool).await?;

    let marks = MarkRepo::list_for_student_sequence(&state.pool, student.id, sequence.id).await?;
    Ok(Json(marks))
}

/// Turn one submission line into a validated write.
async fn validate_entry(
    state: &AppState,
    class: &scholaris_db::models::school_class::SchoolClass,
    entry: &MarkEntry,
) -> AppResult<MarkWrite> {
    let student = require_student(&state.pool, &entry.student_id).await?;
    if student.class_id != class.id {
        return Err(AppError::Core(CoreError::forbidden(format!(
            "Student {} is not enrolled in this class",
            entry.student_id
        ))));
    }

    let raw = entry.score.trim();
    if raw.is_empty() {
        return Ok(MarkWrite::Delete {
            student_id: student.id,
        });
    }

    let score: f64 = raw.parse().map_err(|_| {
        AppError::Core(CoreError::Validation(format!(
            "Invalid score '{}' for student {}",
            entry.score, entry.student_id
        )))
    })?;
    if !(0.0..=20.0).contains(&score) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Score {} for student {} is out of range (0-20)",
            score, entry.student_id
        ))));
    }

    let score = round_score(score);
    let (grade, remark) = evaluate(score);
    Ok(MarkWrite::Upsert {
        student_id: student.id,
        score,
        grade,
        remark,
    })
}

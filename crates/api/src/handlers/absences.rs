//! Handlers for student and teacher absences.
//!
//! Student absences are taken roster-style for one date against the
//! active sequence; teacher absences are single toggles recorded by an
//! admin.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use scholaris_core::error::CoreError;
use scholaris_core::types::DbId;
use scholaris_db::models::absence::{
    AbsenceSubmission, AbsenceWrite, StudentAbsence, TeacherAbsence, TeacherAbsenceToggle,
};
use scholaris_db::repositories::{
    AbsenceRepo, SequenceRepo, StudentRepo, TeacherRepo, TermRepo,
};

use crate::error::{AppError, AppResult};
use crate::handlers::school_classes::require_class;
use crate::handlers::sequences::require_active_sequence;
use crate::handlers::students::require_student;
use crate::handlers::teachers::require_own_profile;
use crate::middleware::rbac::{RequireAdmin, RequireTeacher};
use crate::state::AppState;

/// Query string for the class roster view.
#[derive(Debug, Deserialize)]
pub struct RosterQuery {
    pub date: NaiveDate,
}

/// One line of the class roster view.
#[derive(Debug, Serialize)]
pub struct RosterLine {
    pub name: String,
    pub student_id: String,
    pub is_absent: bool,
}

/// POST /api/v1/absences/students
///
/// Roster-style attendance for one date. Each line names a student and an
/// `is_absent` string: `"true"` records the absence, `"false"` clears it,
/// anything else leaves that student untouched. The whole roster is
/// applied in one transaction against the active sequence.
pub async fn submit_student_roster(
    State(state): State<AppState>,
    RequireTeacher(user): RequireTeacher,
    Json(input): Json<AbsenceSubmission>,
) -> AppResult<StatusCode> {
    require_own_profile(&state.pool, user.account_id).await?;
    let sequence = require_active_sequence(&state.pool).await?;

    let mut writes = Vec::with_capacity(input.class_list.len());
    for entry in &input.class_list {
        let student = require_student(&state.pool, &entry.student_id).await?;
        match entry.is_absent.as_str() {
            "true" => writes.push(AbsenceWrite::Mark {
                student_id: student.id,
            }),
            "false" => writes.push(AbsenceWrite::Clear {
                student_id: student.id,
            }),
            _ => {}
        }
    }

    AbsenceRepo::apply_student_roster(&state.pool, sequence.id, input.date, &writes).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/school-classes/{class_id}/absences?date=YYYY-MM-DD
///
/// The attendance roster of a class for one date, for re-display before a
/// correction.
pub async fn class_roster(
    State(state): State<AppState>,
    RequireTeacher(user): RequireTeacher,
    Path(class_id): Path<DbId>,
    Query(query): Query<RosterQuery>,
) -> AppResult<Json<Vec<RosterLine>>> {
    require_own_profile(&state.pool, user.account_id).await?;
    let class = require_class(&state.pool, class_id).await?;

    let absent = AbsenceRepo::absent_student_ids_on(&state.pool, class.id, query.date).await?;
    let students = StudentRepo::list_for_class(&state.pool, class.id).await?;

    let roster = students
        .into_iter()
        .map(|s| RosterLine {
            is_absent: absent.contains(&s.id),
            name: s.name,
            student_id: s.student_id,
        })
        .collect();
    Ok(Json(roster))
}

/// GET /api/v1/absences/students/{student_id}/sequences/{sequence_id}
pub async fn list_student_for_sequence(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path((student_id, sequence_id)): Path<(String, DbId)>,
) -> AppResult<Json<Vec<StudentAbsence>>> {
    let student = require_student(&state.pool, &student_id).await?;
    SequenceRepo::find_by_id(&state.pool, sequence_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sequence",
            id: sequence_id,
        }))?;

    let absences =
        AbsenceRepo::list_for_student_sequence(&state.pool, student.id, sequence_id).await?;
    Ok(Json(absences))
}

/// GET /api/v1/absences/students/{student_id}/terms/{term_id}
pub async fn list_student_for_term(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path((student_id, term_id)): Path<(String, DbId)>,
) -> AppResult<Json<Vec<StudentAbsence>>> {
    let student = require_student(&state.pool, &student_id).await?;
    TermRepo::find_by_id(&state.pool, term_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Term",
            id: term_id,
        }))?;

    let absences = AbsenceRepo::list_for_student_term(&state.pool, student.id, term_id).await?;
    Ok(Json(absences))
}

/// POST /api/v1/absences/teachers/{teacher_id}
///
/// Records or clears a teacher absence for one date. Recording twice is a
/// no-op.
pub async fn toggle_teacher(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(teacher_id): Path<DbId>,
    Json(input): Json<TeacherAbsenceToggle>,
) -> AppResult<StatusCode> {
    TeacherRepo::find_by_id(&state.pool, teacher_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Teacher",
            id: teacher_id,
        }))?;

    if input.is_absent {
        AbsenceRepo::mark_teacher(&state.pool, teacher_id, input.period_id, input.date).await?;
    } else {
        AbsenceRepo::clear_teacher(&state.pool, teacher_id, input.date).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/absences/teachers/{teacher_id}
pub async fn list_for_teacher(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(teacher_id): Path<DbId>,
) -> AppResult<Json<Vec<TeacherAbsence>>> {
    TeacherRepo::find_by_id(&state.pool, teacher_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Teacher",
            id: teacher_id,
        }))?;

    let absences = AbsenceRepo::list_for_teacher(&state.pool, teacher_id).await?;
    Ok(Json(absences))
}

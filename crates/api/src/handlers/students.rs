//! Handlers for the `/students` resource.
//!
//! Students are addressed by their generated external identifier
//! (e.g. `FAS24K042`), never by the internal row id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Datelike, Utc};
use serde::Serialize;
use validator::Validate;

use scholaris_core::error::CoreError;
use scholaris_core::stats::{round2, suppress_blank_performance, SequenceAverage};
use scholaris_core::student_id::StudentIdGenerator;
use scholaris_core::types::DbId;
use scholaris_db::models::student::{CreateStudent, Student};
use scholaris_db::repositories::{AbsenceRepo, SequenceRepo, StudentRepo, TermRepo, YearRepo};

use crate::error::{validation_error, AppError, AppResult};
use crate::handlers::school_classes::require_class_in_active_year;
use crate::handlers::years::require_active_year;
use crate::middleware::rbac::{RequireAdmin, RequireSuperuser};
use crate::state::AppState;

/// Response for `GET /students`.
#[derive(Debug, Serialize)]
pub struct StudentList {
    pub count: usize,
    pub students: Vec<Student>,
}

/// Response for `GET /students/{student_id}`.
#[derive(Debug, Serialize)]
pub struct StudentDetail {
    #[serde(flatten)]
    pub student: Student,
    /// Weighted average per sequence of the active term. Empty until marks
    /// exist.
    pub performance: Vec<SequenceAverage>,
    /// Days absent in the active sequence, if one is running.
    pub absences: Option<i64>,
    pub class_mates: Vec<Student>,
}

/// Look up a student by external identifier or fail with 404.
pub(crate) async fn require_student(
    pool: &scholaris_db::DbPool,
    student_id: &str,
) -> AppResult<Student> {
    StudentRepo::find_by_student_id(pool, student_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found(format!(
                "Student {student_id} not found"
            )))
        })
}

/// POST /api/v1/school-classes/{class_id}/students
///
/// Enrols a student in a class of the active year. The external
/// identifier is drawn at random against a snapshot of the ids already
/// issued for the admission year; `uq_students_student_id` backs the
/// snapshot against races.
pub async fn create(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(class_id): Path<DbId>,
    Json(input): Json<CreateStudent>,
) -> AppResult<(StatusCode, Json<Student>)> {
    input.validate().map_err(|e| validation_error(&e))?;

    let class = require_class_in_active_year(&state.pool, class_id).await?;

    if StudentRepo::name_exists_in_class(&state.pool, class.id, &input.name).await? {
        return Err(AppError::Core(CoreError::forbidden(
            "A student with this name is already enrolled in the class",
        )));
    }

    let admission_year = Utc::now().year();
    let prefix = format!(
        "{}{:02}",
        state.config.school_initials,
        admission_year.rem_euclid(100)
    );
    let existing = StudentRepo::list_ids_with_prefix(&state.pool, &prefix).await?;

    let generator = StudentIdGenerator::new(&state.config.school_initials, admission_year, existing);
    let student_id = generator.generate(&mut rand::rng()).map_err(|_| {
        AppError::Core(CoreError::forbidden(
            "No free student identifiers remain for this year",
        ))
    })?;

    let student = StudentRepo::create(&state.pool, class.id, &student_id, &input).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /api/v1/students
///
/// Every student of the active year, with the total count.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
) -> AppResult<Json<StudentList>> {
    let year = require_active_year(&state.pool).await?;
    let students = StudentRepo::list_for_year(&state.pool, year.id).await?;
    Ok(Json(StudentList {
        count: students.len(),
        students,
    }))
}

/// GET /api/v1/years/{year_id}/students
pub async fn list_for_year(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(year_id): Path<DbId>,
) -> AppResult<Json<StudentList>> {
    YearRepo::find_by_id(&state.pool, year_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Year",
            id: year_id,
        }))?;
    let students = StudentRepo::list_for_year(&state.pool, year_id).await?;
    Ok(Json(StudentList {
        count: students.len(),
        students,
    }))
}

/// GET /api/v1/students/{student_id}
pub async fn get_by_student_id(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(student_id): Path<String>,
) -> AppResult<Json<StudentDetail>> {
    let student = require_student(&state.pool, &student_id).await?;

    // Per-sequence averages over the active term, if one is running.
    let performance = match TermRepo::find_active(&state.pool).await? {
        Some(term) => {
            let totals =
                StudentRepo::sequence_totals_for_term(&state.pool, student.id, term.id).await?;
            let averages = totals
                .into_iter()
                .map(|t| {
                    let average = if t.total_coefficient == 0 {
                        0.0
                    } else {
                        #[allow(clippy::cast_precision_loss)]
                        round2(t.weighted_score / t.total_coefficient as f64)
                    };
                    SequenceAverage {
                        name: t.short_name,
                        average,
                    }
                })
                .collect();
            suppress_blank_performance(averages)
        }
        None => Vec::new(),
    };

    let absences = match SequenceRepo::find_active(&state.pool).await? {
        Some(sequence) => Some(
            AbsenceRepo::count_for_student_sequence(&state.pool, student.id, sequence.id).await?,
        ),
        None => None,
    };

    let class_mates = StudentRepo::list_for_class(&state.pool, student.class_id)
        .await?
        .into_iter()
        .filter(|s| s.id != student.id)
        .collect();

    Ok(Json(StudentDetail {
        student,
        performance,
        absences,
        class_mates,
    }))
}

/// PUT /api/v1/students/{student_id}
///
/// Updates a student's descriptive fields; the external identifier never
/// changes. Only students of the active year can be edited.
pub async fn update(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(student_id): Path<String>,
    Json(input): Json<CreateStudent>,
) -> AppResult<Json<Student>> {
    input.validate().map_err(|e| validation_error(&e))?;

    let student = require_student(&state.pool, &student_id).await?;
    require_class_in_active_year(&state.pool, student.class_id).await?;

    let student = StudentRepo::update(&state.pool, student.id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found(format!(
                "Student {student_id} not found"
            )))
        })?;
    Ok(Json(student))
}

/// PUT /api/v1/students/{student_id}/class/{class_id}
///
/// Moves a student to another class of the active year.
pub async fn move_to_class(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path((student_id, class_id)): Path<(String, DbId)>,
) -> AppResult<Json<Student>> {
    let student = require_student(&state.pool, &student_id).await?;
    let class = require_class_in_active_year(&state.pool, class_id).await?;

    StudentRepo::set_class(&state.pool, student.id, class.id).await?;

    let student = require_student(&state.pool, &student_id).await?;
    Ok(Json(student))
}

/// DELETE /api/v1/students/{student_id}
///
/// Only students of the active year can be removed.
pub async fn delete(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(student_id): Path<String>,
) -> AppResult<StatusCode> {
    let student = require_student(&state.pool, &student_id).await?;
    require_class_in_active_year(&state.pool, student.class_id).await?;

    StudentRepo::delete(&state.pool, student.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

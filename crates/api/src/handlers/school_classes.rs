//! Handlers for the `/school-classes` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use scholaris_core::error::CoreError;
use scholaris_core::types::DbId;
use scholaris_db::models::school_class::{CreateSchoolClass, SchoolClass, SchoolClassOverview};
use scholaris_db::models::student::Student;
use scholaris_db::models::teacher::Teacher;
use scholaris_db::repositories::{PeriodRepo, SchoolClassRepo, StudentRepo, TeacherRepo};

use crate::error::{validation_error, AppError, AppResult};
use crate::handlers::years::require_active_year;
use crate::middleware::rbac::{RequireAdmin, RequireSuperuser};
use crate::state::AppState;

/// Response for `GET /school-classes/{id}`.
#[derive(Debug, Serialize)]
pub struct SchoolClassDetail {
    #[serde(flatten)]
    pub class: SchoolClass,
    pub master: Option<Teacher>,
    pub prefect: Option<Student>,
    pub students: Vec<Student>,
}

/// Look up a class or fail with 404.
pub(crate) async fn require_class(
    pool: &scholaris_db::DbPool,
    id: DbId,
) -> AppResult<SchoolClass> {
    SchoolClassRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id,
        }))
}

/// Look up a class and require that it belongs to the active year.
pub(crate) async fn require_class_in_active_year(
    pool: &scholaris_db::DbPool,
    id: DbId,
) -> AppResult<SchoolClass> {
    let year = require_active_year(pool).await?;
    let class = require_class(pool, id).await?;
    if class.year_id != year.id {
        return Err(AppError::Core(CoreError::forbidden(
            "This class does not belong to the active academic year",
        )));
    }
    Ok(class)
}

/// POST /api/v1/school-classes
///
/// Creates a class in the active year. Class names are unique within a
/// year (`uq_school_classes_year_name`).
pub async fn create(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Json(input): Json<CreateSchoolClass>,
) -> AppResult<(StatusCode, Json<SchoolClass>)> {
    input.validate().map_err(|e| validation_error(&e))?;

    let year = require_active_year(&state.pool).await?;
    let class = SchoolClassRepo::create(
        &state.pool,
        year.id,
        &input.name,
        &input.short_name,
        &input.level,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(class)))
}

/// GET /api/v1/school-classes
///
/// Lists the active year's classes with their enrolment gender split.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
) -> AppResult<Json<Vec<SchoolClassOverview>>> {
    let year = require_active_year(&state.pool).await?;
    let classes = SchoolClassRepo::list_with_overview(&state.pool, year.id).await?;
    Ok(Json(classes))
}

/// GET /api/v1/school-classes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<SchoolClassDetail>> {
    let class = require_class(&state.pool, id).await?;

    let students = StudentRepo::list_for_class(&state.pool, class.id).await?;
    let master = match class.master_id {
        Some(master_id) => TeacherRepo::find_by_id(&state.pool, master_id).await?,
        None => None,
    };
    let prefect = match class.prefect_id {
        Some(prefect_id) => StudentRepo::find_by_id(&state.pool, prefect_id).await?,
        None => None,
    };

    Ok(Json(SchoolClassDetail {
        class,
        master,
        prefect,
        students,
    }))
}

/// GET /api/v1/school-classes/{id}/students
pub async fn list_students(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Student>>> {
    let class = require_class(&state.pool, id).await?;
    let students = StudentRepo::list_for_class(&state.pool, class.id).await?;
    Ok(Json(students))
}

/// GET /api/v1/school-classes/{id}/teachers
///
/// The distinct teachers holding at least one period in the class.
pub async fn list_teachers(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Teacher>>> {
    let class = require_class(&state.pool, id).await?;
    let teachers = TeacherRepo::list_for_class(&state.pool, class.id).await?;
    Ok(Json(teachers))
}

/// PUT /api/v1/school-classes/{id}
///
/// Updates the descriptive fields; only classes of the active year can be
/// edited.
pub async fn update(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateSchoolClass>,
) -> AppResult<Json<SchoolClass>> {
    input.validate().map_err(|e| validation_error(&e))?;

    require_class_in_active_year(&state.pool, id).await?;

    let class = SchoolClassRepo::update_info(
        &state.pool,
        id,
        &input.name,
        &input.short_name,
        &input.level,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Class",
        id,
    }))?;
    Ok(Json(class))
}

/// PUT /api/v1/school-classes/{id}/master/{teacher_id}
///
/// Assigns the class master. The teacher must hold at least one timetable
/// period in the class; the previous master's flag is released.
pub async fn assign_master(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path((id, teacher_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<SchoolClass>> {
    let class = require_class_in_active_year(&state.pool, id).await?;

    TeacherRepo::find_by_id(&state.pool, teacher_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Teacher",
            id: teacher_id,
        }))?;

    if !PeriodRepo::teacher_has_period_in_class(&state.pool, teacher_id, class.id).await? {
        return Err(AppError::Core(CoreError::forbidden(
            "The class master must teach at least one period in the class",
        )));
    }

    SchoolClassRepo::assign_master(&state.pool, class.id, teacher_id).await?;

    let class = require_class(&state.pool, id).await?;
    Ok(Json(class))
}

/// PUT /api/v1/school-classes/{id}/prefect/{student_id}
///
/// Assigns the class prefect. The student must be enrolled in the class;
/// the previous prefect's flag is released.
pub async fn assign_prefect(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path((id, student_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<SchoolClass>> {
    let class = require_class_in_active_year(&state.pool, id).await?;

    let student = StudentRepo::find_by_id(&state.pool, student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: student_id,
        }))?;

    if student.class_id != class.id {
        return Err(AppError::Core(CoreError::forbidden(
            "The prefect must be a student of the class",
        )));
    }

    SchoolClassRepo::assign_prefect(&state.pool, class.id, student_id).await?;

    let class = require_class(&state.pool, id).await?;
    Ok(Json(class))
}

/// DELETE /api/v1/school-classes/{id}
///
/// Deletes a class of the active year; its periods and students cascade.
pub async fn delete(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_class_in_active_year(&state.pool, id).await?;
    SchoolClassRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for the `/departments` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use scholaris_core::error::CoreError;
use scholaris_core::types::DbId;
use scholaris_db::models::department::{CreateDepartment, Department, DepartmentOverview};
use scholaris_db::models::teacher::Teacher;
use scholaris_db::repositories::{DepartmentRepo, TeacherRepo};

use crate::error::{validation_error, AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireSuperuser};
use crate::state::AppState;

/// Response for `GET /departments/{id}/teachers`.
#[derive(Debug, Serialize)]
pub struct DepartmentTeachers {
    pub department: Department,
    pub hod: Option<Teacher>,
    pub teachers: Vec<Teacher>,
}

/// POST /api/v1/departments
pub async fn create(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Json(input): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<Department>)> {
    input.validate().map_err(|e| validation_error(&e))?;
    let department = DepartmentRepo::create(&state.pool, &input.name).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

/// GET /api/v1/departments
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
) -> AppResult<Json<Vec<DepartmentOverview>>> {
    let departments = DepartmentRepo::list_with_overview(&state.pool).await?;
    Ok(Json(departments))
}

/// GET /api/v1/departments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Department>> {
    let department = DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;
    Ok(Json(department))
}

/// GET /api/v1/departments/{id}/teachers
pub async fn list_teachers(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DepartmentTeachers>> {
    let department = DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;

    let teachers = TeacherRepo::list_for_department(&state.pool, id).await?;
    let hod = match department.hod_id {
        Some(hod_id) => TeacherRepo::find_by_id(&state.pool, hod_id).await?,
        None => None,
    };

    Ok(Json(DepartmentTeachers {
        department,
        hod,
        teachers,
    }))
}

/// PUT /api/v1/departments/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateDepartment>,
) -> AppResult<Json<Department>> {
    input.validate().map_err(|e| validation_error(&e))?;
    let department = DepartmentRepo::rename(&state.pool, id, &input.name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;
    Ok(Json(department))
}

/// PUT /api/v1/departments/{id}/hod/{teacher_id}
///
/// Promotes a teacher of the department to head of department, demoting
/// the current HOD if any.
pub async fn set_hod(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path((id, teacher_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Department>> {
    DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;

    let teacher = TeacherRepo::find_by_id(&state.pool, teacher_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Teacher",
            id: teacher_id,
        }))?;

    if teacher.department_id != id {
        return Err(AppError::Core(CoreError::forbidden(
            "The head of department must belong to the department",
        )));
    }

    DepartmentRepo::set_hod(&state.pool, id, teacher_id).await?;

    let department = DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;
    Ok(Json(department))
}

/// DELETE /api/v1/departments/{id}
///
/// Deletes the department and every teacher under it.
pub async fn delete(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !DepartmentRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

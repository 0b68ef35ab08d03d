//! Handlers for the `/teachers` resource.
//!
//! A teacher is an account composed with a profile row; every id in these
//! URLs is the profile id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use scholaris_core::error::CoreError;
use scholaris_core::roles::ROLE_SUPERUSER;
use scholaris_core::types::DbId;
use scholaris_db::models::period::PeriodDetail;
use scholaris_db::models::teacher::{CreateTeacher, Teacher, UpdateTeacher};
use scholaris_db::repositories::{AbsenceRepo, DepartmentRepo, PeriodRepo, TeacherRepo};

use crate::auth::password::hash_password;
use crate::error::{validation_error, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireSuperuser, RequireTeacher};
use crate::state::AppState;

/// Response for `GET /teachers/{id}`: the teacher plus their timetable
/// and absence record.
#[derive(Debug, Serialize)]
pub struct TeacherDetail {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub periods: Vec<PeriodDetail>,
    /// Sum of `number_of_periods` across all timetable slots.
    pub weekly_periods: i32,
    pub absences: i64,
}

/// Resolve the teacher profile belonging to an authenticated account.
pub(crate) async fn require_own_profile(
    pool: &scholaris_db::DbPool,
    account_id: DbId,
) -> AppResult<Teacher> {
    TeacherRepo::find_by_account_id(pool, account_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("No teacher profile for this account")))
}

/// POST /api/v1/departments/{id}/teachers
///
/// Creates the teacher's account and profile. A teacher name must be
/// unique within its department.
pub async fn create(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(department_id): Path<DbId>,
    Json(input): Json<CreateTeacher>,
) -> AppResult<(StatusCode, Json<Teacher>)> {
    input.validate().map_err(|e| validation_error(&e))?;

    DepartmentRepo::find_by_id(&state.pool, department_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id: department_id,
        }))?;

    if TeacherRepo::name_exists_in_department(&state.pool, department_id, &input.name).await? {
        return Err(AppError::Core(CoreError::forbidden(
            "A teacher with this name already exists in the department",
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let teacher = TeacherRepo::create(
        &state.pool,
        department_id,
        &input.name,
        &input.email,
        &input.phone,
        &input.gender,
        input.date_of_birth,
        input.address.as_deref(),
        &password_hash,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(teacher)))
}

/// GET /api/v1/teachers
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
) -> AppResult<Json<Vec<Teacher>>> {
    let teachers = TeacherRepo::list(&state.pool).await?;
    Ok(Json(teachers))
}

/// GET /api/v1/teachers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<TeacherDetail>> {
    let teacher = TeacherRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Teacher",
            id,
        }))?;
    detail(&state, teacher).await.map(Json)
}

/// GET /api/v1/teachers/me
///
/// The authenticated teacher's own detail view.
pub async fn me(
    State(state): State<AppState>,
    RequireTeacher(user): RequireTeacher,
) -> AppResult<Json<TeacherDetail>> {
    let teacher = require_own_profile(&state.pool, user.account_id).await?;
    detail(&state, teacher).await.map(Json)
}

/// GET /api/v1/teachers/{id}/periods
pub async fn list_periods(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<PeriodDetail>>> {
    TeacherRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Teacher",
            id,
        }))?;
    let periods = PeriodRepo::list_for_teacher(&state.pool, id).await?;
    Ok(Json(periods))
}

/// PUT /api/v1/teachers/{id}
///
/// Superusers can edit any teacher; teachers can edit themselves.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTeacher>,
) -> AppResult<Json<Teacher>> {
    let teacher = TeacherRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Teacher",
            id,
        }))?;

    if user.role != ROLE_SUPERUSER && teacher.account_id != user.account_id {
        return Err(AppError::Core(CoreError::forbidden(
            "You can only edit your own profile",
        )));
    }

    let teacher = TeacherRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Teacher",
            id,
        }))?;
    Ok(Json(teacher))
}

/// DELETE /api/v1/teachers/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TeacherRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Teacher",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Assemble the detail view: timetable in weekday order, weekly period
/// total, and absence count.
async fn detail(state: &AppState, teacher: Teacher) -> AppResult<TeacherDetail> {
    let periods = PeriodRepo::list_for_teacher(&state.pool, teacher.id).await?;
    let weekly_periods = periods.iter().map(|p| p.number_of_periods).sum();
    let absences = AbsenceRepo::count_for_teacher(&state.pool, teacher.id).await?;

    Ok(TeacherDetail {
        teacher,
        periods,
        weekly_periods,
        absences,
    })
}

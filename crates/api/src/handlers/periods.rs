//! Handlers for timetable periods.
//!
//! Periods are created and listed under their class
//! (`/school-classes/{class_id}/periods`); deletion addresses the period
//! directly.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use scholaris_core::error::CoreError;
use scholaris_core::types::DbId;
use scholaris_db::models::period::{CreatePeriod, Period, PeriodDetail};
use scholaris_db::repositories::{PeriodRepo, SubjectRepo, TeacherRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::school_classes::require_class_in_active_year;
use crate::middleware::rbac::{RequireAdmin, RequireSuperuser};
use crate::state::AppState;

/// POST /api/v1/school-classes/{class_id}/periods
pub async fn create(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(class_id): Path<DbId>,
    Json(input): Json<CreatePeriod>,
) -> AppResult<(StatusCode, Json<Period>)> {
    let class = require_class_in_active_year(&state.pool, class_id).await?;

    SubjectRepo::find_by_id(&state.pool, input.subject_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id: input.subject_id,
        }))?;
    TeacherRepo::find_by_id(&state.pool, input.teacher_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Teacher",
            id: input.teacher_id,
        }))?;

    if input.end_time <= input.start_time {
        return Err(AppError::Core(CoreError::Validation(
            "A period must end after it starts".into(),
        )));
    }

    let period = PeriodRepo::create(&state.pool, class.id, &input).await?;
    Ok((StatusCode::CREATED, Json(period)))
}

/// GET /api/v1/school-classes/{class_id}/periods
///
/// The class timetable in weekday, then start-time order.
pub async fn list_for_class(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(class_id): Path<DbId>,
) -> AppResult<Json<Vec<PeriodDetail>>> {
    let class = crate::handlers::school_classes::require_class(&state.pool, class_id).await?;
    let periods = PeriodRepo::list_for_class(&state.pool, class.id).await?;
    Ok(Json(periods))
}

/// DELETE /api/v1/periods/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PeriodRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Period",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

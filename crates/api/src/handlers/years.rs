//! Handlers for the `/years` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use scholaris_core::error::CoreError;
use scholaris_core::lifecycle::{check_close_year, PeriodStatus};
use scholaris_core::types::DbId;
use scholaris_db::models::year::{CreateYear, Year, YearOverview};
use scholaris_db::repositories::YearRepo;

use crate::error::{validation_error, AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireSuperuser};
use crate::state::AppState;

/// Look up the single active year or fail with 404.
pub(crate) async fn require_active_year(pool: &scholaris_db::DbPool) -> AppResult<Year> {
    YearRepo::find_active(pool)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("There is no active academic year")))
}

/// POST /api/v1/years
///
/// Creates the new year directly in the active state, so it is rejected
/// while another year is still running.
pub async fn create(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Json(input): Json<CreateYear>,
) -> AppResult<(StatusCode, Json<Year>)> {
    input.validate().map_err(|e| validation_error(&e))?;

    if YearRepo::find_active(&state.pool).await?.is_some() {
        return Err(AppError::Core(CoreError::forbidden(
            "An academic year is already active",
        )));
    }

    let year = YearRepo::create(&state.pool, &input.name).await?;
    Ok((StatusCode::CREATED, Json(year)))
}

/// GET /api/v1/years
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
) -> AppResult<Json<Vec<YearOverview>>> {
    let years = YearRepo::list_with_overview(&state.pool).await?;
    Ok(Json(years))
}

/// GET /api/v1/years/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Year>> {
    let year = YearRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Year", id }))?;
    Ok(Json(year))
}

/// PUT /api/v1/years/{id}
///
/// Renames a year. Only the active year can be edited.
pub async fn update(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateYear>,
) -> AppResult<Json<Year>> {
    input.validate().map_err(|e| validation_error(&e))?;

    let year = YearRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Year", id }))?;

    if year.status != PeriodStatus::Active.as_str() {
        return Err(AppError::Core(CoreError::forbidden(
            "Only the active academic year can be edited",
        )));
    }

    let year = YearRepo::rename(&state.pool, id, &input.name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Year", id }))?;
    Ok(Json(year))
}

/// PUT /api/v1/years/deactivate
///
/// Closes the active year and cascades closure to its terms and sequences.
/// Requires at least 3 terms and 6 sequences under the year.
pub async fn deactivate(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
) -> AppResult<Json<Year>> {
    let year = require_active_year(&state.pool).await?;

    let (terms, sequences) = YearRepo::child_counts(&state.pool, year.id).await?;
    check_close_year(terms, sequences)?;

    if !YearRepo::close_cascade(&state.pool, year.id).await? {
        // Someone else closed it between the lookup and the update.
        return Err(AppError::Core(CoreError::not_found(
            "There is no active academic year",
        )));
    }

    let year = YearRepo::find_by_id(&state.pool, year.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Year",
            id: year.id,
        }))?;
    Ok(Json(year))
}

/// DELETE /api/v1/years/{id}
///
/// Only a closed year can be deleted; its terms, classes, and students
/// cascade away with it.
pub async fn delete(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let year = YearRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Year", id }))?;

    if year.status != PeriodStatus::Closed.as_str() {
        return Err(AppError::Core(CoreError::forbidden(
            "Only a closed academic year can be deleted",
        )));
    }

    YearRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

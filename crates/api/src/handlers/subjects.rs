//! Handlers for the `/subjects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use scholaris_core::error::CoreError;
use scholaris_core::types::DbId;
use scholaris_db::models::subject::{CreateSubject, Subject};
use scholaris_db::repositories::SubjectRepo;

use crate::error::{validation_error, AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireSuperuser};
use crate::state::AppState;

/// POST /api/v1/subjects
///
/// The same subject name may exist at both levels or with a different
/// coefficient; exact duplicates are rejected by
/// `uq_subjects_name_coefficient_level`.
pub async fn create(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Json(input): Json<CreateSubject>,
) -> AppResult<(StatusCode, Json<Subject>)> {
    input.validate().map_err(|e| validation_error(&e))?;
    let subject = SubjectRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

/// GET /api/v1/subjects
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
) -> AppResult<Json<Vec<Subject>>> {
    let subjects = SubjectRepo::list(&state.pool).await?;
    Ok(Json(subjects))
}

/// GET /api/v1/subjects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Subject>> {
    let subject = SubjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }))?;
    Ok(Json(subject))
}

/// PUT /api/v1/subjects/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateSubject>,
) -> AppResult<Json<Subject>> {
    input.validate().map_err(|e| validation_error(&e))?;
    let subject = SubjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }))?;
    Ok(Json(subject))
}

/// DELETE /api/v1/subjects/{id}
///
/// Deletes the subject; its periods and marks cascade.
pub async fn delete(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SubjectRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

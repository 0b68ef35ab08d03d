//! Handlers for the `/sequences` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use scholaris_core::error::CoreError;
use scholaris_core::lifecycle::PeriodStatus;
use scholaris_core::types::DbId;
use scholaris_db::models::sequence::{CreateSequence, Sequence};
use scholaris_db::repositories::SequenceRepo;

use crate::error::{validation_error, AppError, AppResult};
use crate::handlers::terms::require_active_term;
use crate::handlers::years::require_active_year;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireSuperuser};
use crate::state::AppState;

/// Look up the single active sequence or fail with 404.
pub(crate) async fn require_active_sequence(pool: &scholaris_db::DbPool) -> AppResult<Sequence> {
    SequenceRepo::find_active(pool)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("There is no active sequence")))
}

/// POST /api/v1/sequences
///
/// Creates a sequence under the active term. Rejected while another
/// sequence is still active.
pub async fn create(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Json(input): Json<CreateSequence>,
) -> AppResult<(StatusCode, Json<Sequence>)> {
    input.validate().map_err(|e| validation_error(&e))?;

    let term = require_active_term(&state.pool).await?;

    if SequenceRepo::find_active(&state.pool).await?.is_some() {
        return Err(AppError::Core(CoreError::forbidden(
            "A sequence is already active",
        )));
    }

    let sequence =
        SequenceRepo::create(&state.pool, term.id, &input.name, &input.short_name).await?;
    Ok((StatusCode::CREATED, Json(sequence)))
}

/// GET /api/v1/sequences
///
/// Lists every sequence of the active year. Readable by any authenticated
/// account; teachers need it on the mark-entry screen.
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Vec<Sequence>>> {
    let year = require_active_year(&state.pool).await?;
    let sequences = SequenceRepo::list_for_year(&state.pool, year.id).await?;
    Ok(Json(sequences))
}

/// GET /api/v1/sequences/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Sequence>> {
    let sequence = SequenceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sequence",
            id,
        }))?;
    Ok(Json(sequence))
}

/// PUT /api/v1/sequences/active
///
/// Renames the currently active sequence.
pub async fn update_active(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Json(input): Json<CreateSequence>,
) -> AppResult<Json<Sequence>> {
    input.validate().map_err(|e| validation_error(&e))?;

    let sequence = require_active_sequence(&state.pool).await?;

    let sequence = SequenceRepo::update(&state.pool, sequence.id, &input.name, &input.short_name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sequence",
            id: sequence.id,
        }))?;
    Ok(Json(sequence))
}

/// PUT /api/v1/sequences/deactivate
///
/// Closes the active sequence. Unlike terms and years, closing a sequence
/// has no precondition.
pub async fn deactivate(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
) -> AppResult<Json<Sequence>> {
    let sequence = require_active_sequence(&state.pool).await?;

    if !SequenceRepo::close(&state.pool, sequence.id).await? {
        return Err(AppError::Core(CoreError::not_found(
            "There is no active sequence",
        )));
    }

    let sequence = SequenceRepo::find_by_id(&state.pool, sequence.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sequence",
            id: sequence.id,
        }))?;
    Ok(Json(sequence))
}

/// DELETE /api/v1/sequences/{id}
///
/// A sequence can only be deleted while it is still active (and therefore
/// within the running year); closed sequences are part of the record.
pub async fn delete(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_active_year(&state.pool).await?;

    let sequence = SequenceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sequence",
            id,
        }))?;

    if sequence.status != PeriodStatus::Active.as_str() {
        return Err(AppError::Core(CoreError::forbidden(
            "Only the active sequence can be deleted",
        )));
    }

    SequenceRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

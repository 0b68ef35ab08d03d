//! Handlers for the `/terms` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use scholaris_core::error::CoreError;
use scholaris_core::lifecycle::{check_close_term, PeriodStatus};
use scholaris_core::types::DbId;
use scholaris_db::models::sequence::Sequence;
use scholaris_db::models::term::{CreateTerm, Term, TermOverview};
use scholaris_db::repositories::{SequenceRepo, TermRepo};

use crate::error::{validation_error, AppError, AppResult};
use crate::handlers::years::require_active_year;
use crate::middleware::rbac::{RequireAdmin, RequireSuperuser};
use crate::state::AppState;

/// Look up the single active term or fail with 404.
pub(crate) async fn require_active_term(pool: &scholaris_db::DbPool) -> AppResult<Term> {
    TermRepo::find_active(pool)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("There is no active term")))
}

/// POST /api/v1/terms
///
/// Creates a term under the active year. Rejected while another term is
/// still active.
pub async fn create(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Json(input): Json<CreateTerm>,
) -> AppResult<(StatusCode, Json<Term>)> {
    input.validate().map_err(|e| validation_error(&e))?;

    let year = require_active_year(&state.pool).await?;

    if TermRepo::find_active(&state.pool).await?.is_some() {
        return Err(AppError::Core(CoreError::forbidden(
            "A term is already active",
        )));
    }

    let term = TermRepo::create(&state.pool, year.id, &input.name).await?;
    Ok((StatusCode::CREATED, Json(term)))
}

/// GET /api/v1/terms
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
) -> AppResult<Json<Vec<TermOverview>>> {
    let terms = TermRepo::list_with_overview(&state.pool).await?;
    Ok(Json(terms))
}

/// GET /api/v1/terms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Term>> {
    let term = TermRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Term", id }))?;
    Ok(Json(term))
}

/// GET /api/v1/terms/{id}/sequences
pub async fn list_sequences(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Sequence>>> {
    let term = TermRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Term", id }))?;
    let sequences = SequenceRepo::list_for_term(&state.pool, term.id).await?;
    Ok(Json(sequences))
}

/// PUT /api/v1/terms/{id}
///
/// Renames a term. Only the active term can be edited.
pub async fn update(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateTerm>,
) -> AppResult<Json<Term>> {
    input.validate().map_err(|e| validation_error(&e))?;

    let term = TermRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Term", id }))?;

    if term.status != PeriodStatus::Active.as_str() {
        return Err(AppError::Core(CoreError::forbidden(
            "Only the active term can be edited",
        )));
    }

    let term = TermRepo::rename(&state.pool, id, &input.name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Term", id }))?;
    Ok(Json(term))
}

/// PUT /api/v1/terms/deactivate
///
/// Closes the active term and its sequences. Requires at least 2 sequences
/// under the term.
pub async fn deactivate(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
) -> AppResult<Json<Term>> {
    let term = require_active_term(&state.pool).await?;

    let sequences = TermRepo::sequence_count(&state.pool, term.id).await?;
    check_close_term(sequences)?;

    if !TermRepo::close_cascade(&state.pool, term.id).await? {
        return Err(AppError::Core(CoreError::not_found(
            "There is no active term",
        )));
    }

    let term = TermRepo::find_by_id(&state.pool, term.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Term",
            id: term.id,
        }))?;
    Ok(Json(term))
}

/// DELETE /api/v1/terms/{id}
///
/// Only a closed term can be deleted.
pub async fn delete(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let term = TermRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Term", id }))?;

    if term.status != PeriodStatus::Closed.as_str() {
        return Err(AppError::Core(CoreError::forbidden(
            "Only a closed term can be deleted",
        )));
    }

    TermRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

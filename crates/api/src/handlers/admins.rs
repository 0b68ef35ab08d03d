//! Handlers for the `/admins` resource.
//!
//! Admin accounts are plain accounts with the admin role and no teacher
//! profile. Only the superuser manages them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use scholaris_core::error::CoreError;
use scholaris_core::roles::ROLE_ADMIN;
use scholaris_core::types::DbId;
use scholaris_db::models::account::{Account, CreateAccount, UpdateAccount};
use scholaris_db::repositories::AccountRepo;

use crate::auth::password::hash_password;
use crate::error::{validation_error, AppError, AppResult};
use crate::middleware::rbac::RequireSuperuser;
use crate::state::AppState;

/// Request body for `PUT /admins/{id}/reset-password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPassword {
    #[validate(length(min = 8))]
    pub password: String,
}

/// Look up an account and require that it holds the admin role.
async fn require_admin_account(pool: &scholaris_db::DbPool, id: DbId) -> AppResult<Account> {
    let account = AccountRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Admin",
            id,
        }))?;
    if account.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Admin",
            id,
        }));
    }
    Ok(account)
}

/// POST /api/v1/admins
pub async fn create(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Json(input): Json<CreateAccount>,
) -> AppResult<(StatusCode, Json<Account>)> {
    input.validate().map_err(|e| validation_error(&e))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let account = AccountRepo::create(
        &state.pool,
        &input.name,
        &input.email,
        &input.phone,
        &input.gender,
        &password_hash,
        ROLE_ADMIN,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /api/v1/admins
pub async fn list(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
) -> AppResult<Json<Vec<Account>>> {
    let admins = AccountRepo::list_by_role(&state.pool, ROLE_ADMIN).await?;
    Ok(Json(admins))
}

/// PUT /api/v1/admins/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAccount>,
) -> AppResult<Json<Account>> {
    input.validate().map_err(|e| validation_error(&e))?;
    require_admin_account(&state.pool, id).await?;

    let account = AccountRepo::update(
        &state.pool,
        id,
        input.name.as_deref(),
        input.email.as_deref(),
        input.phone.as_deref(),
        input.gender.as_deref(),
        input.date_of_birth,
        input.address.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Admin",
        id,
    }))?;
    Ok(Json(account))
}

/// PUT /api/v1/admins/{id}/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPassword>,
) -> AppResult<StatusCode> {
    input.validate().map_err(|e| validation_error(&e))?;
    require_admin_account(&state.pool, id).await?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    AccountRepo::update_password(&state.pool, id, &password_hash).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admins/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireSuperuser(_user): RequireSuperuser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_admin_account(&state.pool, id).await?;
    AccountRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

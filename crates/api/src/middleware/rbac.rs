//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level, so a route's permission gate is visible
//! in its signature.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use scholaris_core::error::CoreError;
use scholaris_core::roles::{ROLE_ADMIN, ROLE_SUPERUSER, ROLE_TEACHER};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `superuser` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn superuser_only(RequireSuperuser(user): RequireSuperuser) -> AppResult<Json<()>> {
///     // user is guaranteed to be a superuser here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireSuperuser(pub AuthUser);

impl FromRequestParts<AppState> for RequireSuperuser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_SUPERUSER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Superuser role required".into(),
            )));
        }
        Ok(RequireSuperuser(user))
    }
}

/// Requires `admin` or `superuser` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_or_superuser(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_SUPERUSER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin or Superuser role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires the `teacher` role. Rejects with 403 Forbidden otherwise.
///
/// Used on the mark-entry endpoints, where the authenticated teacher's own
/// profile is recorded against every mark they submit.
pub struct RequireTeacher(pub AuthUser);

impl FromRequestParts<AppState> for RequireTeacher {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_TEACHER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Teacher role required".into(),
            )));
        }
        Ok(RequireTeacher(user))
    }
}

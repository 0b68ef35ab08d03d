//! Route definitions for admin account management.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admins;
use crate::state::AppState;

/// Routes mounted at `/admins` (superuser only).
///
/// ```text
/// GET    /                     -> list
/// POST   /                     -> create
/// PUT    /{id}                 -> update
/// DELETE /{id}                 -> delete
/// PUT    /{id}/reset-password  -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(admins::list).post(admins::create))
        .route("/{id}", put(admins::update).delete(admins::delete))
        .route("/{id}/reset-password", put(admins::reset_password))
}

//! Route definitions for teachers.
//!
//! Teacher creation is mounted under the department
//! (`/departments/{id}/teachers`, see [`super::departments::router`]).

use axum::routing::get;
use axum::Router;

use crate::handlers::teachers;
use crate::state::AppState;

/// Routes mounted at `/teachers`.
///
/// ```text
/// GET    /               -> list
/// GET    /me             -> me (the authenticated teacher)
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update (superuser, or the teacher themself)
/// DELETE /{id}           -> delete
/// GET    /{id}/periods   -> list_periods
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(teachers::list))
        .route("/me", get(teachers::me))
        .route(
            "/{id}",
            get(teachers::get_by_id)
                .put(teachers::update)
                .delete(teachers::delete),
        )
        .route("/{id}/periods", get(teachers::list_periods))
}

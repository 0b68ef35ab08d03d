//! Route definitions for departments.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{departments, teachers};
use crate::state::AppState;

/// Routes mounted at `/departments`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// GET    /{id}/teachers           -> list_teachers (with HOD)
/// POST   /{id}/teachers           -> teachers::create
/// PUT    /{id}/hod/{teacher_id}   -> set_hod
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(departments::list).post(departments::create))
        .route(
            "/{id}",
            get(departments::get_by_id)
                .put(departments::update)
                .delete(departments::delete),
        )
        .route(
            "/{id}/teachers",
            get(departments::list_teachers).post(teachers::create),
        )
        .route("/{id}/hod/{teacher_id}", put(departments::set_hod))
}

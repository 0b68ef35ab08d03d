//! Route definitions for subjects.

use axum::routing::get;
use axum::Router;

use crate::handlers::subjects;
use crate::state::AppState;

/// Routes mounted at `/subjects`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(subjects::list).post(subjects::create))
        .route(
            "/{id}",
            get(subjects::get_by_id)
                .put(subjects::update)
                .delete(subjects::delete),
        )
}

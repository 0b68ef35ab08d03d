//! Route definitions for terms.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::terms;
use crate::state::AppState;

/// Routes mounted at `/terms`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// PUT    /deactivate       -> deactivate (close the active term)
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// GET    /{id}/sequences   -> list_sequences
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(terms::list).post(terms::create))
        .route("/deactivate", put(terms::deactivate))
        .route(
            "/{id}",
            get(terms::get_by_id)
                .put(terms::update)
                .delete(terms::delete),
        )
        .route("/{id}/sequences", get(terms::list_sequences))
}

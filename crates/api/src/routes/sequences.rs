//! Route definitions for sequences.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::sequences;
use crate::state::AppState;

/// Routes mounted at `/sequences`.
///
/// The active sequence is renamed and closed through static segments
/// rather than its id; it is the only sequence that can change.
///
/// ```text
/// GET    /             -> list (any authenticated account)
/// POST   /             -> create
/// PUT    /active       -> update_active (rename the active sequence)
/// PUT    /deactivate   -> deactivate (close the active sequence)
/// GET    /{id}         -> get_by_id
/// DELETE /{id}         -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sequences::list).post(sequences::create))
        .route("/active", put(sequences::update_active))
        .route("/deactivate", put(sequences::deactivate))
        .route(
            "/{id}",
            get(sequences::get_by_id).delete(sequences::delete),
        )
}

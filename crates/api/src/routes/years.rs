//! Route definitions for academic years.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{students, years};
use crate::state::AppState;

/// Routes mounted at `/years`.
///
/// `/deactivate` is a static segment, so it wins over the `{id}` capture.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// PUT    /deactivate          -> deactivate (close the active year)
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// GET    /{year_id}/students  -> students::list_for_year
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(years::list).post(years::create))
        .route("/deactivate", put(years::deactivate))
        .route(
            "/{id}",
            get(years::get_by_id)
                .put(years::update)
                .delete(years::delete),
        )
        .route("/{year_id}/students", get(students::list_for_year))
}

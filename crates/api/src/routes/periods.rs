//! Route definitions for timetable periods.
//!
//! Creation and listing live under the class
//! (`/school-classes/{id}/periods`, see [`super::school_classes::router`]);
//! only deletion addresses the period directly.

use axum::routing::delete;
use axum::Router;

use crate::handlers::periods;
use crate::state::AppState;

/// Routes mounted at `/periods`.
///
/// ```text
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(periods::delete))
}

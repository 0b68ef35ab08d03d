//! Route definitions for performance reports.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET /classes/{class_id}/subjects/{subject_id}/sequences/{sequence_id}
///     -> class_subject_sequence
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/classes/{class_id}/subjects/{subject_id}/sequences/{sequence_id}",
        get(reports::class_subject_sequence),
    )
}

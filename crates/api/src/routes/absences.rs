//! Route definitions for absences.
//!
//! The per-class roster view is mounted under the class
//! (`/school-classes/{id}/absences`, see [`super::school_classes::router`]).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::absences;
use crate::state::AppState;

/// Routes mounted at `/absences`.
///
/// ```text
/// POST /students                                      -> submit_student_roster
/// GET  /students/{student_id}/sequences/{sequence_id} -> list_student_for_sequence
/// GET  /students/{student_id}/terms/{term_id}         -> list_student_for_term
/// POST /teachers/{teacher_id}                         -> toggle_teacher
/// GET  /teachers/{teacher_id}                         -> list_for_teacher
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/students", post(absences::submit_student_roster))
        .route(
            "/students/{student_id}/sequences/{sequence_id}",
            get(absences::list_student_for_sequence),
        )
        .route(
            "/students/{student_id}/terms/{term_id}",
            get(absences::list_student_for_term),
        )
        .route(
            "/teachers/{teacher_id}",
            get(absences::list_for_teacher).post(absences::toggle_teacher),
        )
}

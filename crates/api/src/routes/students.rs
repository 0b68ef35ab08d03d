//! Route definitions for students.
//!
//! Enrolment is mounted under the class
//! (`/school-classes/{id}/students`, see [`super::school_classes::router`]).
//! Everything here addresses a student by their external identifier.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{marks, students};
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET    /                                -> list (active year, with count)
/// GET    /{student_id}                    -> get_by_student_id (detail)
/// PUT    /{student_id}                    -> update
/// DELETE /{student_id}                    -> delete
/// PUT    /{student_id}/class/{class_id}   -> move_to_class
/// GET    /{student_id}/marks              -> marks::list_for_student
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(students::list))
        .route(
            "/{student_id}",
            get(students::get_by_student_id)
                .put(students::update)
                .delete(students::delete),
        )
        .route(
            "/{student_id}/class/{class_id}",
            put(students::move_to_class),
        )
        .route("/{student_id}/marks", get(marks::list_for_student))
}

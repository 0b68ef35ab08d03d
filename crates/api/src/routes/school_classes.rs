//! Route definitions for school classes and their nested resources.
//!
//! Enrolment, timetabling, mark entry, and the attendance roster all hang
//! off the class they belong to.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{absences, marks, periods, school_classes, students};
use crate::state::AppState;

/// Routes mounted at `/school-classes`.
///
/// ```text
/// GET    /                                    -> list (active year overview)
/// POST   /                                    -> create
/// GET    /{id}                                -> get_by_id
/// PUT    /{id}                                -> update
/// DELETE /{id}                                -> delete
/// GET    /{id}/students                       -> list_students
/// POST   /{id}/students                       -> students::create (enrol)
/// GET    /{id}/teachers                       -> list_teachers
/// GET    /{id}/periods                        -> periods::list_for_class
/// POST   /{id}/periods                        -> periods::create
/// PUT    /{id}/master/{teacher_id}            -> assign_master
/// PUT    /{id}/prefect/{student_id}           -> assign_prefect
/// GET    /{id}/absences?date=                 -> absences::class_roster
/// GET    /{id}/subjects/{subject_id}/marks    -> marks::roster
/// POST   /{id}/subjects/{subject_id}/marks    -> marks::submit_batch
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(school_classes::list).post(school_classes::create),
        )
        .route(
            "/{id}",
            get(school_classes::get_by_id)
                .put(school_classes::update)
                .delete(school_classes::delete),
        )
        .route(
            "/{id}/students",
            get(school_classes::list_students).post(students::create),
        )
        .route("/{id}/teachers", get(school_classes::list_teachers))
        .route(
            "/{id}/periods",
            get(periods::list_for_class).post(periods::create),
        )
        .route(
            "/{id}/master/{teacher_id}",
            put(school_classes::assign_master),
        )
        .route(
            "/{id}/prefect/{student_id}",
            put(school_classes::assign_prefect),
        )
        .route("/{id}/absences", get(absences::class_roster))
        .route(
            "/{id}/subjects/{subject_id}/marks",
            get(marks::roster).post(marks::submit_batch),
        )
}

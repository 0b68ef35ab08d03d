pub mod absences;
pub mod admins;
pub mod auth;
pub mod departments;
pub mod health;
pub mod periods;
pub mod reports;
pub mod school_classes;
pub mod sequences;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod terms;
pub mod years;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
///
/// /admins                                          list, create (superuser)
/// /admins/{id}                                     update, delete
/// /admins/{id}/reset-password                      reset password (PUT)
///
/// /years                                           list, create
/// /years/deactivate                                close the active year (PUT)
/// /years/{id}                                      get, update, delete
/// /years/{year_id}/students                        students of a past or current year
///
/// /terms                                           list, create
/// /terms/deactivate                                close the active term (PUT)
/// /terms/{id}                                      get, update, delete
/// /terms/{id}/sequences                            sequences of a term
///
/// /sequences                                       list, create
/// /sequences/active                                rename the active sequence (PUT)
/// /sequences/deactivate                            close the active sequence (PUT)
/// /sequences/{id}                                  get, delete
///
/// /departments                                     list, create
/// /departments/{id}                                get, update, delete
/// /departments/{id}/teachers                       list with HOD, create teacher
/// /departments/{id}/hod/{teacher_id}               promote to HOD (PUT)
///
/// /teachers                                        list
/// /teachers/me                                     the authenticated teacher
/// /teachers/{id}                                   get, update, delete
/// /teachers/{id}/periods                           a teacher's timetable
///
/// /school-classes                                  list, create (active year)
/// /school-classes/{id}                             get, update, delete
/// /school-classes/{id}/students                    list, enrol
/// /school-classes/{id}/teachers                    teachers holding a period
/// /school-classes/{id}/periods                     timetable; list, create
/// /school-classes/{id}/master/{teacher_id}         assign class master (PUT)
/// /school-classes/{id}/prefect/{student_id}        assign prefect (PUT)
/// /school-classes/{id}/absences                    attendance roster (?date=)
/// /school-classes/{id}/subjects/{sid}/marks        mark-entry roster; batch submit
///
/// /subjects                                        list, create
/// /subjects/{id}                                   get, update, delete
///
/// /periods/{id}                                    delete
///
/// /students                                        active-year listing with count
/// /students/{student_id}                           detail, update, delete
/// /students/{student_id}/class/{class_id}          move to another class (PUT)
/// /students/{student_id}/marks                     active-sequence marks
///
/// /absences/students                               batch attendance (POST)
/// /absences/students/{student_id}/sequences/{id}   absences within a sequence
/// /absences/students/{student_id}/terms/{id}       absences within a term
/// /absences/teachers/{teacher_id}                  list, toggle (GET, POST)
///
/// /reports/classes/{cid}/subjects/{sid}/sequences/{qid}
///                                                  pass/fail report
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Admin account management (superuser only).
        .nest("/admins", admins::router())
        // Academic calendar: years, terms, sequences.
        .nest("/years", years::router())
        .nest("/terms", terms::router())
        .nest("/sequences", sequences::router())
        // Staff structure: departments and teachers.
        .nest("/departments", departments::router())
        .nest("/teachers", teachers::router())
        // Classes and their nested enrolment, timetable, and mark entry.
        .nest("/school-classes", school_classes::router())
        // Subject catalogue.
        .nest("/subjects", subjects::router())
        // Direct period deletion.
        .nest("/periods", periods::router())
        // Students, addressed by external identifier.
        .nest("/students", students::router())
        // Attendance for students and teachers.
        .nest("/absences", absences::router())
        // Pass/fail reporting.
        .nest("/reports", reports::router())
}

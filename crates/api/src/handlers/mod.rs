//! HTTP request handlers, one module per resource.

pub mod absences;
pub mod admins;
pub mod auth;
pub mod departments;
pub mod marks;
pub mod periods;
pub mod reports;
pub mod school_classes;
pub mod sequences;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod terms;
pub mod years;

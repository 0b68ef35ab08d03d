//! Domain logic for the Scholaris school-administration backend.
//!
//! This crate is free of I/O. It holds the error taxonomy, shared types,
//! role constants, the academic-period lifecycle rules, the grade
//! evaluator, the student-id generator, and the statistics helpers used by
//! the reporting endpoints.

pub mod error;
pub mod grading;
pub mod lifecycle;
pub mod roles;
pub mod stats;
pub mod student_id;
pub mod types;

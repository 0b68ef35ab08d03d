//! Absence models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scholaris_core::types::{DbId, Timestamp};

/// A row from the `student_absences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentAbsence {
    pub id: DbId,
    pub student_id: DbId,
    pub sequence_id: DbId,
    pub date: NaiveDate,
    pub created_at: Timestamp,
}

/// A row from the `teacher_absences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeacherAbsence {
    pub id: DbId,
    pub teacher_id: DbId,
    pub period_id: Option<DbId>,
    pub date: NaiveDate,
    pub created_at: Timestamp,
}

/// Request body for the batch student-absence endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AbsenceSubmission {
    pub class_list: Vec<AbsenceEntry>,
    pub date: NaiveDate,
}

/// One roster line. `is_absent` arrives as the strings `"true"` /
/// `"false"`; anything else is a silent no-op for that student.
#[derive(Debug, Clone, Deserialize)]
pub struct AbsenceEntry {
    pub student_id: String,
    pub is_absent: String,
}

/// A validated roster write for the transactional batch.
#[derive(Debug, Clone, Copy)]
pub enum AbsenceWrite {
    /// Record the student absent on the date (create-if-missing).
    Mark { student_id: DbId },
    /// Clear any recorded absence on the date (delete-if-present).
    Clear { student_id: DbId },
}

/// Request body for the single teacher-absence toggle.
#[derive(Debug, Clone, Deserialize)]
pub struct TeacherAbsenceToggle {
    pub date: NaiveDate,
    pub is_absent: bool,
    pub period_id: Option<DbId>,
}

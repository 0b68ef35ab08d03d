//! Mark entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scholaris_core::types::{DbId, Timestamp};

/// A row from the `marks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mark {
    pub id: DbId,
    pub student_id: DbId,
    pub subject_id: DbId,
    pub sequence_id: DbId,
    pub teacher_id: Option<DbId>,
    pub score: f64,
    pub grade: String,
    pub remark: String,
    pub competency: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A mark joined with subject and sequence names, for per-student listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MarkDetail {
    pub id: DbId,
    pub subject_name: String,
    pub coefficient: i32,
    pub sequence_name: String,
    pub score: f64,
    pub grade: String,
    pub remark: String,
    pub competency: Option<String>,
}

/// Request body for the batch mark-entry endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkSubmission {
    pub class_list: Vec<MarkEntry>,
    pub competency: Option<String>,
}

/// One roster line of a batch submission. An empty-string score deletes
/// any existing mark for the student.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkEntry {
    pub student_id: String,
    pub score: String,
}

/// A fully validated write, ready for the transactional batch.
#[derive(Debug, Clone)]
pub enum MarkWrite {
    Upsert {
        student_id: DbId,
        score: f64,
        grade: &'static str,
        remark: &'static str,
    },
    Delete {
        student_id: DbId,
    },
}

/// One roster line of the mark-entry screen: the student plus any score
/// already recorded for the sequence.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RosterEntry {
    pub name: String,
    pub student_id: String,
    pub gender: String,
    pub score: Option<f64>,
    pub competency: Option<String>,
}

/// A mark joined with its student, feeding the class/subject report.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportMark {
    pub id: DbId,
    pub name: String,
    pub student_id: String,
    pub gender: String,
    pub score: f64,
}

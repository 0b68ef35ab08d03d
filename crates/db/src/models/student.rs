//! Student entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use scholaris_core::types::{DbId, Timestamp};

/// A row from the `students` table.
///
/// `student_id` is the generated external identifier (e.g. `FAS24K042`)
/// used in every student-scoped URL; `id` stays internal.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub class_id: DbId,
    pub name: String,
    pub student_id: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub place_of_birth: Option<String>,
    pub address: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: String,
    pub is_prefect: bool,
    pub is_repeater: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or updating a student.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudent {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub place_of_birth: Option<String>,
    pub address: Option<String>,
    pub parent_name: Option<String>,
    #[validate(length(min = 6, max = 20))]
    pub parent_phone: String,
    #[serde(default)]
    pub is_repeater: bool,
}

/// Per-sequence weighted totals for one student, before the average is
/// computed in `scholaris_core::stats`.
#[derive(Debug, Clone, FromRow)]
pub struct SequenceScoreTotals {
    pub sequence_id: DbId,
    pub short_name: String,
    pub weighted_score: f64,
    pub total_coefficient: i64,
}

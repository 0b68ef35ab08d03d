//! Timetable period entity model and DTOs.
//!
//! "Period" here is the scheduling slot, not the year/term/sequence
//! lifecycle sense.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scholaris_core::types::{DbId, Timestamp};

/// A row from the `periods` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Period {
    pub id: DbId,
    pub subject_id: DbId,
    pub teacher_id: DbId,
    pub class_id: DbId,
    pub day: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub number_of_periods: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a period in a class.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePeriod {
    pub subject_id: DbId,
    pub teacher_id: DbId,
    pub day: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub number_of_periods: i32,
}

/// A period joined with its subject and class names, for timetables.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PeriodDetail {
    pub id: DbId,
    pub subject_name: String,
    pub class_name: String,
    pub day: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub number_of_periods: i32,
}

//! Teacher model and DTOs.
//!
//! A teacher is an `accounts` row composed with a `teacher_profiles` row;
//! [`Teacher`] is the joined shape the API works with. `id` is the profile
//! id, which is what every teacher-scoped URL refers to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use scholaris_core::types::DbId;

/// Joined `teacher_profiles` x `accounts` row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Teacher {
    pub id: DbId,
    pub account_id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub department_id: DbId,
    pub is_hod: bool,
    pub is_class_master: bool,
}

/// DTO for creating a teacher (account + profile in one step).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeacher {
    #[validate(length(min = 1, max = 180))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 20))]
    pub phone: String,
    pub gender: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

/// DTO for updating a teacher's account fields. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeacher {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

/// Compact shape used in department and class listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeacherBrief {
    pub id: DbId,
    pub name: String,
    pub is_class_master: bool,
}

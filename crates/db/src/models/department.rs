//! Department entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use scholaris_core::types::{DbId, Timestamp};

/// A row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: DbId,
    pub name: String,
    pub hod_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or renaming a department.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDepartment {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// A department plus its teacher head-count split for the listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DepartmentOverview {
    pub id: DbId,
    pub name: String,
    pub hod_id: Option<DbId>,
    pub teachers: i64,
    pub male_teachers: i64,
    pub female_teachers: i64,
}

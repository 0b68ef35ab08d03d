//! Academic year entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use scholaris_core::types::{DbId, Timestamp};

/// A row from the `years` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Year {
    pub id: DbId,
    pub name: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or renaming a year.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateYear {
    #[validate(length(min = 1, max = 60))]
    pub name: String,
}

/// A year plus the child counts shown in the listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct YearOverview {
    pub id: DbId,
    pub name: String,
    pub status: String,
    pub students: i64,
    pub terms: i64,
    pub sequences: i64,
}

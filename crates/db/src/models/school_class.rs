//! School class entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use scholaris_core::types::{DbId, Timestamp};

/// A row from the `school_classes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SchoolClass {
    pub id: DbId,
    pub year_id: DbId,
    pub name: String,
    pub short_name: String,
    pub level: String,
    pub master_id: Option<DbId>,
    pub prefect_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or updating a class.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSchoolClass {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub short_name: String,
    pub level: String,
}

/// A class plus its enrolment gender split for the listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SchoolClassOverview {
    pub id: DbId,
    pub name: String,
    pub short_name: String,
    pub level: String,
    pub total: i64,
    pub males: i64,
    pub females: i64,
}

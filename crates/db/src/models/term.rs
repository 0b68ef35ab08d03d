//! Term entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use scholaris_core::types::{DbId, Timestamp};

/// A row from the `terms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Term {
    pub id: DbId,
    pub year_id: DbId,
    pub name: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or renaming a term.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTerm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// A term plus its year name and sequence count for the listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TermOverview {
    pub id: DbId,
    pub name: String,
    pub year_name: String,
    pub status: String,
    pub sequences_count: i64,
}

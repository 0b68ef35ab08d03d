//! Sequence (marking period) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use scholaris_core::types::{DbId, Timestamp};

/// A row from the `sequences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sequence {
    pub id: DbId,
    pub term_id: DbId,
    pub name: String,
    pub short_name: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or updating a sequence.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSequence {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub short_name: String,
}

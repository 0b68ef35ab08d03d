//! Subject entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use scholaris_core::types::{DbId, Timestamp};

/// A row from the `subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: DbId,
    pub name: String,
    pub short_name: String,
    pub coefficient: i32,
    pub level: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or updating a subject.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubject {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub short_name: String,
    #[validate(range(min = 1, max = 5))]
    pub coefficient: i32,
    pub level: String,
}

//! Account entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use scholaris_core::types::{DbId, Timestamp};

/// A row from the `accounts` table.
///
/// The password hash never leaves the server, so it is skipped during
/// serialization.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Account {
    pub id: DbId,
    pub phone: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub gender: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating an account. Absent fields are left untouched.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAccount {
    #[validate(length(min = 1, max = 180))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 20))]
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

/// DTO for creating a new admin account.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAccount {
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

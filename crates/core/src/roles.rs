//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `accounts.role` in
//! `0001_create_accounts.sql`.

pub const ROLE_SUPERUSER: &str = "superuser";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TEACHER: &str = "teacher";

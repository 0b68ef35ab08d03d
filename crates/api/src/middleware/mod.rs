//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated account from a JWT Bearer token.
//! - [`rbac::RequireSuperuser`] -- Requires the `superuser` role.
//! - [`rbac::RequireAdmin`] -- Requires `admin` or `superuser` role.
//! - [`rbac::RequireTeacher`] -- Requires the `teacher` role.

pub mod auth;
pub mod rbac;

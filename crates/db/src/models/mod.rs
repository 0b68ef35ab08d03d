//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Where the API patches records, an update DTO with `Option` fields

pub mod absence;
pub mod account;
pub mod department;
pub mod mark;
pub mod period;
pub mod school_class;
pub mod sequence;
pub mod session;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod term;
pub mod year;

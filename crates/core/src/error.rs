use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Business-rule violations (duplicate names, wrong lifecycle state,
/// identifier exhaustion) are all `Forbidden`; the HTTP layer maps the
/// variants to status codes and a `{"error": [messages]}` body.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Not-found conditions without a concrete id, e.g. "no active year".
    #[error("{0}")]
    NotFoundMsg(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn forbidden(msg: impl Into<String>) -> Self {
        CoreError::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        CoreError::NotFoundMsg(msg.into())
    }
}

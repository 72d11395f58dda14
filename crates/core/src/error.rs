use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Lookup by a non-id key (e.g. an OTP code) found nothing.
    #[error("Entity not found: {entity} with {field} '{value}'")]
    NotFoundBy {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A time-bounded credential exists but is past its expiry.
    #[error("Expired: {0}")]
    Expired(String),

    /// A bounded retry loop gave up without producing a result.
    #[error("Gave up after {attempts} attempts: {what}")]
    ExhaustedRetries { what: &'static str, attempts: u32 },

    #[error("Internal error: {0}")]
    Internal(String),
}

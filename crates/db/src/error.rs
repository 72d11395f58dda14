use coach_core::error::CoreError;

/// Error returned by the store implementations.
///
/// The ordering and OTP algorithms raise [`CoreError`]; the queries behind
/// them raise [`sqlx::Error`]. Callers classify both.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Primary keys are Postgres `BIGSERIAL`.
pub type DbId = i64;

/// Stored in `TIMESTAMPTZ` columns, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A 1-based slot in an ordered list (the `"order"` column).
pub type Position = i32;

//! Shared query parameter types for API handlers.

use coach_core::types::DbId;
use serde::Deserialize;

/// `?category_id=` filter for the exercise catalog.
#[derive(Debug, Deserialize)]
pub struct CategoryFilter {
    pub category_id: Option<DbId>,
}

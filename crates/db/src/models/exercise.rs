//! Catalog exercises that routines reference.

use coach_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `exercises` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Exercise {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub img_url: Option<String>,
    pub category_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateExercise {
    pub name: String,
    pub description: Option<String>,
    pub img_url: Option<String>,
    pub category_id: Option<DbId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateExercise {
    pub name: Option<String>,
    pub description: Option<String>,
    pub img_url: Option<String>,
    pub category_id: Option<DbId>,
}

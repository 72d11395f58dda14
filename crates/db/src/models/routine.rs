//! Routine templates owned by a trainer.

use coach_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Routine {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub trainer_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoutine {
    pub name: String,
    pub description: Option<String>,
    pub trainer_id: DbId,
}

/// The owning trainer is fixed at creation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoutine {
    pub name: Option<String>,
    pub description: Option<String>,
}

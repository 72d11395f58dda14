//! A routine assigned to an athlete.

use chrono::NaiveDate;
use coach_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignedRoutine {
    pub id: DbId,
    pub routine_id: DbId,
    pub athlete_id: DbId,
    pub description: Option<String>,
    pub assignment_date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignedRoutine {
    pub routine_id: DbId,
    pub athlete_id: DbId,
    pub description: Option<String>,
    pub assignment_date: Option<NaiveDate>,
}

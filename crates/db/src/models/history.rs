//! Athlete progress history: body weight entries and snapshots of completed
//! routines.

use chrono::NaiveDate;
use coach_core::types::{DbId, Position, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `weight_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WeightHistory {
    pub id: DbId,
    pub athlete_id: DbId,
    pub recorded_on: NaiveDate,
    pub weight_kg: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWeightHistory {
    pub athlete_id: DbId,
    pub recorded_on: NaiveDate,
    pub weight_kg: f64,
}

/// A completed routine, frozen at completion time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoutineHistory {
    pub id: DbId,
    pub athlete_id: DbId,
    pub assigned_routine_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One exercise of a completed routine, as it was when completed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExerciseHistory {
    pub id: DbId,
    pub athlete_id: DbId,
    pub exercise_id: Option<DbId>,
    pub routine_history_id: DbId,
    pub order: Position,
    pub reps: Option<i32>,
    pub series: Option<i32>,
    pub weight_kg: Option<f64>,
    pub rest_time_s: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

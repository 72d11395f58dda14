//! Exercises placed inside a routine, kept in dense 1-based `order`.

use coach_core::ordering::OrderedItem;
use coach_core::types::{DbId, Position, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `routine_exercises` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoutineExercise {
    pub id: DbId,
    pub routine_id: DbId,
    pub exercise_id: DbId,
    pub order: Position,
    pub reps: Option<i32>,
    pub series: Option<i32>,
    pub weight_kg: Option<f64>,
    pub rest_time_s: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderedItem for RoutineExercise {
    fn id(&self) -> DbId {
        self.id
    }
    fn parent_id(&self) -> DbId {
        self.routine_id
    }
    fn order(&self) -> Position {
        self.order
    }
}

/// Everything stored on a new row except its parent and position.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutineExercisePayload {
    pub exercise_id: DbId,
    pub reps: Option<i32>,
    pub series: Option<i32>,
    pub weight_kg: Option<f64>,
    pub rest_time_s: Option<i32>,
}

/// Payload patch. Position changes go through the ordering manager instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRoutineExercise {
    pub exercise_id: Option<DbId>,
    pub reps: Option<i32>,
    pub series: Option<i32>,
    pub weight_kg: Option<f64>,
    pub rest_time_s: Option<i32>,
}

impl UpdateRoutineExercise {
    pub fn is_empty(&self) -> bool {
        self.exercise_id.is_none()
            && self.reps.is_none()
            && self.series.is_none()
            && self.weight_kg.is_none()
            && self.rest_time_s.is_none()
    }
}

//! An athlete's copy of a routine exercise, with completion tracking.

use coach_core::ordering::OrderedItem;
use coach_core::types::{DbId, Position, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `assigned_exercises` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignedExercise {
    pub id: DbId,
    pub assigned_routine_id: DbId,
    pub exercise_id: DbId,
    pub order: Position,
    pub reps: Option<i32>,
    pub series: Option<i32>,
    pub weight_kg: Option<f64>,
    pub rest_time_s: Option<i32>,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderedItem for AssignedExercise {
    fn id(&self) -> DbId {
        self.id
    }
    fn parent_id(&self) -> DbId {
        self.assigned_routine_id
    }
    fn order(&self) -> Position {
        self.order
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignedExercisePayload {
    pub exercise_id: DbId,
    pub reps: Option<i32>,
    pub series: Option<i32>,
    pub weight_kg: Option<f64>,
    pub rest_time_s: Option<i32>,
}

/// Payload and completion patch. Who may set which field is decided by
/// `coach_core::access`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssignedExercise {
    pub reps: Option<i32>,
    pub series: Option<i32>,
    pub weight_kg: Option<f64>,
    pub rest_time_s: Option<i32>,
    pub completed: Option<bool>,
}

impl UpdateAssignedExercise {
    pub fn is_empty(&self) -> bool {
        self.reps.is_none()
            && self.series.is_none()
            && self.weight_kg.is_none()
            && self.rest_time_s.is_none()
            && self.completed.is_none()
    }
}

//! Ownership and field-level access rules shared by the API handlers.
//!
//! Role names come from [`crate::roles`]. Admins pass every ownership check.

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_ATHLETE, ROLE_TRAINER};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Athlete data
// ---------------------------------------------------------------------------

/// Athletes may read their own data; trainers may read data of athletes they
/// coach.
pub fn ensure_can_view_athlete(
    role: &str,
    user_id: DbId,
    athlete_id: DbId,
    athlete_trainer_id: Option<DbId>,
) -> Result<(), CoreError> {
    match role {
        ROLE_ADMIN => Ok(()),
        ROLE_ATHLETE if user_id == athlete_id => Ok(()),
        ROLE_TRAINER if athlete_trainer_id == Some(user_id) => Ok(()),
        ROLE_ATHLETE => Err(CoreError::Forbidden(
            "You can only access your own data".into(),
        )),
        _ => Err(CoreError::Forbidden(
            "You can only access athletes you coach".into(),
        )),
    }
}

/// Only the trainer who owns a resource (or an admin) may manage it.
pub fn ensure_trainer_owns(
    role: &str,
    user_id: DbId,
    owner_trainer_id: Option<DbId>,
    what: &str,
) -> Result<(), CoreError> {
    match role {
        ROLE_ADMIN => Ok(()),
        ROLE_TRAINER if owner_trainer_id == Some(user_id) => Ok(()),
        _ => Err(CoreError::Forbidden(format!(
            "You can only manage your own {what}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Assigned exercise updates
// ---------------------------------------------------------------------------

/// A field of an assigned exercise that a PATCH may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignedExerciseField {
    Order,
    Reps,
    Series,
    WeightKg,
    RestTimeS,
    Completed,
}

impl AssignedExerciseField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Order => "desired_order",
            Self::Reps => "reps",
            Self::Series => "series",
            Self::WeightKg => "weight_kg",
            Self::RestTimeS => "rest_time_s",
            Self::Completed => "completed",
        }
    }

    /// Fields an athlete may change on their own assigned exercises.
    fn athlete_may_edit(self) -> bool {
        !matches!(self, Self::Order)
    }
}

/// Decide whether a user may apply a patch touching `fields`.
///
/// - Trainers may change everything except `completed`.
/// - The owning athlete may change the payload and `completed`, not the order.
/// - Anyone else is rejected.
pub fn ensure_can_update_assigned_exercise(
    role: &str,
    is_owner_athlete: bool,
    fields: &[AssignedExerciseField],
) -> Result<(), CoreError> {
    match role {
        ROLE_TRAINER | ROLE_ADMIN => {
            if fields.contains(&AssignedExerciseField::Completed) {
                return Err(CoreError::Forbidden(
                    "Trainers cannot modify the 'completed' field".into(),
                ));
            }
            Ok(())
        }
        ROLE_ATHLETE if is_owner_athlete => {
            if let Some(field) = fields.iter().find(|f| !f.athlete_may_edit()) {
                return Err(CoreError::Forbidden(format!(
                    "Athletes cannot modify the '{}' field",
                    field.as_str()
                )));
            }
            Ok(())
        }
        _ => Err(CoreError::Forbidden("Unauthorized".into())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

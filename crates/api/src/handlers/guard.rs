//! Loaders that fetch a row and check that the caller may act on it.
//!
//! Every loader returns 404 for a missing row before any ownership check, so
//! the order of errors is the same across resources.

use coach_core::access::{ensure_can_view_athlete, ensure_trainer_owns};
use coach_core::error::CoreError;
use coach_core::types::DbId;
use coach_db::models::assigned_routine::AssignedRoutine;
use coach_db::models::athlete::Athlete;
use coach_db::models::routine::Routine;
use coach_db::repositories::{AssignedRoutineRepo, AthleteRepo, RoutineRepo};
use coach_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

pub async fn find_athlete(pool: &DbPool, athlete_id: DbId) -> AppResult<Athlete> {
    AthleteRepo::find_by_id(pool, athlete_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Athlete",
            id: athlete_id,
        }))
}

/// The athlete, if the caller is that athlete, their trainer, or an admin.
pub async fn viewable_athlete(
    pool: &DbPool,
    user: &AuthUser,
    athlete_id: DbId,
) -> AppResult<Athlete> {
    let athlete = find_athlete(pool, athlete_id).await?;
    ensure_can_view_athlete(&user.role, user.user_id, athlete.id, athlete.trainer_id)?;
    Ok(athlete)
}

/// The athlete, if the caller is their trainer or an admin.
pub async fn coached_athlete(
    pool: &DbPool,
    user: &AuthUser,
    athlete_id: DbId,
) -> AppResult<Athlete> {
    let athlete = find_athlete(pool, athlete_id).await?;
    ensure_trainer_owns(&user.role, user.user_id, athlete.trainer_id, "athletes")?;
    Ok(athlete)
}

pub async fn owned_routine(pool: &DbPool, user: &AuthUser, routine_id: DbId) -> AppResult<Routine> {
    let routine = RoutineRepo::find_by_id(pool, routine_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Routine",
            id: routine_id,
        }))?;
    ensure_trainer_owns(&user.role, user.user_id, Some(routine.trainer_id), "routines")?;
    Ok(routine)
}

/// An assigned routine together with the trainer who owns its source routine.
pub struct Assignment {
    pub assigned: AssignedRoutine,
    pub trainer_id: Option<DbId>,
}

impl Assignment {
    /// Whether `user` is the athlete the routine is assigned to.
    pub fn is_assignee(&self, user: &AuthUser) -> bool {
        user.is_athlete() && user.user_id == self.assigned.athlete_id
    }
}

async fn find_assignment(pool: &DbPool, assigned_routine_id: DbId) -> AppResult<Assignment> {
    let assigned = AssignedRoutineRepo::find_by_id(pool, assigned_routine_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AssignedRoutine",
            id: assigned_routine_id,
        }))?;
    let trainer_id = RoutineRepo::find_by_id(pool, assigned.routine_id)
        .await?
        .map(|r| r.trainer_id);
    Ok(Assignment {
        assigned,
        trainer_id,
    })
}

/// Readable by the assignee, the owning trainer, or an admin.
pub async fn viewable_assignment(
    pool: &DbPool,
    user: &AuthUser,
    assigned_routine_id: DbId,
) -> AppResult<Assignment> {
    let assignment = find_assignment(pool, assigned_routine_id).await?;
    if !assignment.is_assignee(user) {
        ensure_trainer_owns(&user.role, user.user_id, assignment.trainer_id, "assigned routines")?;
    }
    Ok(assignment)
}

/// Manageable by the owning trainer or an admin.
pub async fn owned_assignment(
    pool: &DbPool,
    user: &AuthUser,
    assigned_routine_id: DbId,
) -> AppResult<Assignment> {
    let assignment = find_assignment(pool, assigned_routine_id).await?;
    ensure_trainer_owns(&user.role, user.user_id, assignment.trainer_id, "assigned routines")?;
    Ok(assignment)
}

/// Find an assignment without any ownership check.
pub async fn any_assignment(pool: &DbPool, assigned_routine_id: DbId) -> AppResult<Assignment> {
    find_assignment(pool, assigned_routine_id).await
}

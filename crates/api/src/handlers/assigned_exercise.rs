//! Handlers for single entries of an assigned routine.
//!
//! Trainers adjust the plan (including position) but never mark progress;
//! the assigned athlete records progress but cannot reorder.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coach_core::access::{
    ensure_can_update_assigned_exercise, ensure_trainer_owns, AssignedExerciseField,
};
use coach_core::error::CoreError;
use coach_core::ordering::{parse_desired_order, OrderedListManager};
use coach_core::types::DbId;
use coach_db::models::assigned_exercise::{AssignedExercise, UpdateAssignedExercise};
use coach_db::repositories::AssignedExerciseRepo;
use coach_db::stores::AssignedExerciseStore;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::guard::{any_assignment, owned_assignment};
use crate::handlers::routine::validate_exercise_values;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PATCH /assigned-exercises/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAssignedExerciseRequest {
    pub desired_order: Option<serde_json::Value>,
    pub reps: Option<i32>,
    pub series: Option<i32>,
    pub weight_kg: Option<f64>,
    pub rest_time_s: Option<i32>,
    pub completed: Option<bool>,
}

impl UpdateAssignedExerciseRequest {
    /// Fields the request actually sets.
    pub fn fields(&self) -> Vec<AssignedExerciseField> {
        let present = [
            (self.desired_order.is_some(), AssignedExerciseField::Order),
            (self.reps.is_some(), AssignedExerciseField::Reps),
            (self.series.is_some(), AssignedExerciseField::Series),
            (self.weight_kg.is_some(), AssignedExerciseField::WeightKg),
            (self.rest_time_s.is_some(), AssignedExerciseField::RestTimeS),
            (self.completed.is_some(), AssignedExerciseField::Completed),
        ];
        present
            .into_iter()
            .filter_map(|(set, field)| set.then_some(field))
            .collect()
    }
}

async fn find_item(state: &AppState, id: DbId) -> AppResult<AssignedExercise> {
    AssignedExerciseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AssignedExercise",
            id,
        }))
}

/// PATCH /api/v1/assigned-exercises/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAssignedExerciseRequest>,
) -> AppResult<impl IntoResponse> {
    let mut item = find_item(&state, id).await?;
    let assignment = any_assignment(&state.pool, item.assigned_routine_id).await?;

    if auth.is_trainer() {
        ensure_trainer_owns(&auth.role, auth.user_id, assignment.trainer_id, "assigned routines")?;
    }
    let fields = input.fields();
    ensure_can_update_assigned_exercise(&auth.role, assignment.is_assignee(&auth), &fields)?;

    if fields.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Nothing to update".into(),
        )));
    }
    let desired_order = parse_desired_order(input.desired_order.as_ref())?;
    validate_exercise_values(input.reps, input.series, input.weight_kg, input.rest_time_s)?;

    if let Some(desired_order) = desired_order {
        let store = AssignedExerciseStore::new(state.pool.clone());
        item = OrderedListManager::new(&store)
            .reorder(id, desired_order)
            .await?;
    }

    let patch = UpdateAssignedExercise {
        reps: input.reps,
        series: input.series,
        weight_kg: input.weight_kg,
        rest_time_s: input.rest_time_s,
        completed: input.completed,
    };
    if !patch.is_empty() {
        item = AssignedExerciseRepo::update(&state.pool, id, &patch)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "AssignedExercise",
                id,
            }))?;
    }

    tracing::info!(
        item_id = id,
        assigned_routine_id = item.assigned_routine_id,
        order = item.order,
        completed = item.completed,
        user_id = auth.user_id,
        role = %auth.role,
        "Assigned exercise updated",
    );
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/assigned-exercises/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = find_item(&state, id).await?;
    owned_assignment(&state.pool, &auth, item.assigned_routine_id).await?;

    let store = AssignedExerciseStore::new(state.pool.clone());
    OrderedListManager::new(&store).delete(id).await?;

    tracing::info!(
        item_id = id,
        assigned_routine_id = item.assigned_routine_id,
        user_id = auth.user_id,
        "Assigned exercise removed",
    );
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn fields_lists_only_present_keys() {
        let req: UpdateAssignedExerciseRequest =
            serde_json::from_value(json!({ "reps": 10, "completed": true })).unwrap();
        assert_eq!(
            req.fields(),
            vec![AssignedExerciseField::Reps, AssignedExerciseField::Completed]
        );
    }

    #[test]
    fn explicit_null_counts_as_absent() {
        let req: UpdateAssignedExerciseRequest =
            serde_json::from_value(json!({ "desired_order": null, "series": 4 })).unwrap();
        assert_eq!(req.fields(), vec![AssignedExerciseField::Series]);
    }
}

//! Handlers for single entries of a routine's ordered exercise list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coach_core::error::CoreError;
use coach_core::ordering::{parse_desired_order, OrderedListManager};
use coach_core::types::DbId;
use coach_db::models::routine_exercise::{RoutineExercise, UpdateRoutineExercise};
use coach_db::repositories::RoutineExerciseRepo;
use coach_db::stores::RoutineExerciseStore;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::guard::owned_routine;
use crate::handlers::routine::{require_exercise, validate_exercise_values};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PATCH /routine-exercises/{id}`: an optional move plus
/// an optional payload patch.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRoutineExerciseRequest {
    pub desired_order: Option<serde_json::Value>,
    pub exercise_id: Option<DbId>,
    pub reps: Option<i32>,
    pub series: Option<i32>,
    pub weight_kg: Option<f64>,
    pub rest_time_s: Option<i32>,
}

async fn owned_item(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<RoutineExercise> {
    let item = RoutineExerciseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RoutineExercise",
            id,
        }))?;
    owned_routine(&state.pool, auth, item.routine_id).await?;
    Ok(item)
}

/// GET /api/v1/routine-exercises/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = owned_item(&state, &auth, id).await?;
    Ok(Json(DataResponse { data: item }))
}

/// PATCH /api/v1/routine-exercises/{id}
///
/// Moves the entry when `desired_order` is present, then applies the payload.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoutineExerciseRequest>,
) -> AppResult<impl IntoResponse> {
    let mut item = owned_item(&state, &auth, id).await?;

    let desired_order = parse_desired_order(input.desired_order.as_ref())?;
    validate_exercise_values(input.reps, input.series, input.weight_kg, input.rest_time_s)?;

    let patch = UpdateRoutineExercise {
        exercise_id: input.exercise_id,
        reps: input.reps,
        series: input.series,
        weight_kg: input.weight_kg,
        rest_time_s: input.rest_time_s,
    };
    if desired_order.is_none() && patch.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Nothing to update".into(),
        )));
    }
    if let Some(exercise_id) = patch.exercise_id {
        require_exercise(&state.pool, exercise_id).await?;
    }

    if let Some(desired_order) = desired_order {
        let store = RoutineExerciseStore::new(state.pool.clone());
        item = OrderedListManager::new(&store)
            .reorder(id, desired_order)
            .await?;
    }

    if !patch.is_empty() {
        item = RoutineExerciseRepo::update_payload(&state.pool, id, &patch)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "RoutineExercise",
                id,
            }))?;
    }

    tracing::info!(
        item_id = id,
        routine_id = item.routine_id,
        order = item.order,
        user_id = auth.user_id,
        "Routine exercise updated",
    );
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/routine-exercises/{id}
///
/// Removes the entry and closes the gap in its routine.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    owned_item(&state, &auth, id).await?;

    let store = RoutineExerciseStore::new(state.pool.clone());
    let removed = OrderedListManager::new(&store).delete(id).await?;

    tracing::info!(
        item_id = id,
        routine_id = removed.routine_id,
        user_id = auth.user_id,
        "Routine exercise removed",
    );
    Ok(StatusCode::NO_CONTENT)
}

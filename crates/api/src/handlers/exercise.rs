//! Handlers for the `/exercises` catalog.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coach_core::error::CoreError;
use coach_core::ordering::OrderedListManager;
use coach_core::types::DbId;
use coach_core::validation::{validate_description, validate_required};
use coach_db::models::exercise::{CreateExercise, UpdateExercise};
use coach_db::repositories::{AssignedExerciseRepo, ExerciseRepo, RoutineExerciseRepo};
use coach_db::stores::{AssignedExerciseStore, RoutineExerciseStore};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireTrainer};
use crate::query::CategoryFilter;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/exercises
pub async fn create(
    RequireTrainer(auth): RequireTrainer,
    State(state): State<AppState>,
    Json(input): Json<CreateExercise>,
) -> AppResult<impl IntoResponse> {
    validate_required("name", &input.name)?;
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    let create = CreateExercise {
        name: input.name.trim().to_string(),
        ..input
    };
    let exercise = ExerciseRepo::create(&state.pool, &create).await?;
    tracing::info!(exercise_id = exercise.id, user_id = auth.user_id, "Exercise created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: exercise })))
}

/// GET /api/v1/exercises?category_id=
pub async fn list(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> AppResult<impl IntoResponse> {
    let exercises = ExerciseRepo::list(&state.pool, filter.category_id).await?;
    Ok(Json(DataResponse { data: exercises }))
}

/// GET /api/v1/exercises/{id}
pub async fn get_by_id(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let exercise = ExerciseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Exercise",
            id,
        }))?;
    Ok(Json(DataResponse { data: exercise }))
}

/// PATCH /api/v1/exercises/{id}
pub async fn update(
    RequireTrainer(auth): RequireTrainer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateExercise>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_required("name", name)?;
    }
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    let exercise = ExerciseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Exercise",
            id,
        }))?;
    tracing::info!(exercise_id = id, user_id = auth.user_id, "Exercise updated");
    Ok(Json(DataResponse { data: exercise }))
}

/// DELETE /api/v1/exercises/{id}
///
/// Rows using the exercise cascade away; the lists they leave behind are
/// renormalized afterwards.
pub async fn delete(
    RequireTrainer(auth): RequireTrainer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let routine_ids = RoutineExerciseRepo::routine_ids_using(&state.pool, id).await?;
    let assigned_ids = AssignedExerciseRepo::assigned_routine_ids_using(&state.pool, id).await?;

    if !ExerciseRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Exercise",
            id,
        }));
    }

    let routine_store = RoutineExerciseStore::new(state.pool.clone());
    let routine_lists = OrderedListManager::new(&routine_store);
    for routine_id in &routine_ids {
        routine_lists.normalize(*routine_id).await?;
    }

    let assigned_store = AssignedExerciseStore::new(state.pool.clone());
    let assigned_lists = OrderedListManager::new(&assigned_store);
    for assigned_id in &assigned_ids {
        assigned_lists.normalize(*assigned_id).await?;
    }

    tracing::info!(
        exercise_id = id,
        user_id = auth.user_id,
        routines = routine_ids.len(),
        assigned_routines = assigned_ids.len(),
        "Exercise deleted",
    );
    Ok(StatusCode::NO_CONTENT)
}

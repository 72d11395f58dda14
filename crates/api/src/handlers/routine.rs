//! Handlers for the `/routines` resource and the ordered exercise list of
//! each routine.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coach_core::error::CoreError;
use coach_core::ordering::{parse_desired_order, OrderedListManager};
use coach_core::types::DbId;
use coach_core::validation::{
    validate_description, validate_optional_load, validate_optional_non_negative,
    validate_required,
};
use coach_db::models::routine::{CreateRoutine, UpdateRoutine};
use coach_db::models::routine_exercise::RoutineExercisePayload;
use coach_db::repositories::{ExerciseRepo, RoutineExerciseRepo, RoutineRepo};
use coach_db::stores::RoutineExerciseStore;
use coach_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::guard::owned_routine;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireTrainer;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /routines`. `trainer_id` is only read for admins.
#[derive(Debug, Deserialize)]
pub struct CreateRoutineRequest {
    pub name: String,
    pub description: Option<String>,
    pub trainer_id: Option<DbId>,
}

/// Request body for inserting an exercise into an ordered list.
///
/// `desired_order` is kept as raw JSON so a malformed value is reported as a
/// validation error rather than a body rejection.
#[derive(Debug, Deserialize)]
pub struct InsertExerciseRequest {
    pub exercise_id: DbId,
    pub reps: Option<i32>,
    pub series: Option<i32>,
    pub weight_kg: Option<f64>,
    pub rest_time_s: Option<i32>,
    pub desired_order: Option<serde_json::Value>,
}

impl InsertExerciseRequest {
    /// Validate the payload values and parse the requested position.
    pub fn validate(&self) -> AppResult<Option<i64>> {
        validate_exercise_values(self.reps, self.series, self.weight_kg, self.rest_time_s)?;
        Ok(parse_desired_order(self.desired_order.as_ref())?)
    }
}

/// Shared checks for reps, series, load and rest.
pub fn validate_exercise_values(
    reps: Option<i32>,
    series: Option<i32>,
    weight_kg: Option<f64>,
    rest_time_s: Option<i32>,
) -> AppResult<()> {
    validate_optional_non_negative("reps", reps)?;
    validate_optional_non_negative("series", series)?;
    validate_optional_non_negative("rest_time_s", rest_time_s)?;
    validate_optional_load(weight_kg)?;
    Ok(())
}

/// 404 unless the catalog exercise exists.
pub async fn require_exercise(pool: &DbPool, exercise_id: DbId) -> AppResult<()> {
    if !ExerciseRepo::exists(pool, exercise_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Exercise",
            id: exercise_id,
        }));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Routine CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/routines
pub async fn create(
    RequireTrainer(auth): RequireTrainer,
    State(state): State<AppState>,
    Json(input): Json<CreateRoutineRequest>,
) -> AppResult<impl IntoResponse> {
    validate_required("name", &input.name)?;
    if let Some(description) = &input.description {
        validate_description(description)?;
    }

    let trainer_id = if auth.is_admin() {
        input.trainer_id.ok_or_else(|| {
            AppError::BadRequest("trainer_id is required when an admin creates a routine".into())
        })?
    } else {
        auth.user_id
    };

    let routine = RoutineRepo::create(
        &state.pool,
        &CreateRoutine {
            name: input.name.trim().to_string(),
            description: input.description,
            trainer_id,
        },
    )
    .await?;

    tracing::info!(routine_id = routine.id, trainer_id, "Routine created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: routine })))
}

/// GET /api/v1/routines
///
/// Trainers see their own routines; admins see all.
pub async fn list(
    RequireTrainer(auth): RequireTrainer,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let owner = (!auth.is_admin()).then_some(auth.user_id);
    let routines = RoutineRepo::list(&state.pool, owner).await?;
    Ok(Json(DataResponse { data: routines }))
}

/// GET /api/v1/routines/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let routine = owned_routine(&state.pool, &auth, id).await?;
    Ok(Json(DataResponse { data: routine }))
}

/// PATCH /api/v1/routines/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoutine>,
) -> AppResult<impl IntoResponse> {
    owned_routine(&state.pool, &auth, id).await?;
    if let Some(name) = &input.name {
        validate_required("name", name)?;
    }
    if let Some(description) = &input.description {
        validate_description(description)?;
    }

    let routine = RoutineRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Routine",
            id,
        }))?;

    tracing::info!(routine_id = id, user_id = auth.user_id, "Routine updated");
    Ok(Json(DataResponse { data: routine }))
}

/// DELETE /api/v1/routines/{id}
///
/// Routine exercises and assignments cascade.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    owned_routine(&state.pool, &auth, id).await?;
    if !RoutineRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Routine",
            id,
        }));
    }
    tracing::info!(routine_id = id, user_id = auth.user_id, "Routine deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Ordered exercises
// ---------------------------------------------------------------------------

/// GET /api/v1/routines/{id}/exercises
pub async fn list_exercises(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    owned_routine(&state.pool, &auth, id).await?;
    let exercises = RoutineExerciseRepo::list_by_routine(&state.pool, id).await?;
    Ok(Json(DataResponse { data: exercises }))
}

/// POST /api/v1/routines/{id}/exercises
///
/// Appends the exercise, or places it at `desired_order` (clamped).
pub async fn insert_exercise(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<InsertExerciseRequest>,
) -> AppResult<impl IntoResponse> {
    owned_routine(&state.pool, &auth, id).await?;
    let desired_order = input.validate()?;
    require_exercise(&state.pool, input.exercise_id).await?;

    let payload = RoutineExercisePayload {
        exercise_id: input.exercise_id,
        reps: input.reps,
        series: input.series,
        weight_kg: input.weight_kg,
        rest_time_s: input.rest_time_s,
    };

    let store = RoutineExerciseStore::new(state.pool.clone());
    let item = OrderedListManager::new(&store)
        .insert(id, payload, desired_order)
        .await?;

    tracing::info!(
        routine_id = id,
        item_id = item.id,
        order = item.order,
        user_id = auth.user_id,
        "Exercise added to routine",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

//! Handlers for `/assigned-routines`: assigning a routine to an athlete,
//! the assigned exercise list, and completion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coach_core::error::CoreError;
use coach_core::ordering::OrderedListManager;
use coach_core::otp::OtpIssuer;
use coach_core::types::DbId;
use coach_core::validation::{parse_date, validate_description};
use coach_db::models::assigned_exercise::AssignedExercisePayload;
use coach_db::models::assigned_routine::{AssignedRoutine, CreateAssignedRoutine};
use coach_db::models::otp::OtpCode;
use coach_db::repositories::{AssignedExerciseRepo, AssignedRoutineRepo, HistoryRepo};
use coach_db::stores::{AssignedExerciseStore, PgOtpStore};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::guard::{
    any_assignment, coached_athlete, owned_assignment, owned_routine, viewable_assignment,
};
use crate::handlers::routine::{require_exercise, InsertExerciseRequest};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAthlete, RequireTrainer};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /assigned-routines`. Dates use `DD/MM/YYYY`.
#[derive(Debug, Deserialize)]
pub struct AssignRoutineRequest {
    pub routine_id: DbId,
    pub athlete_id: DbId,
    pub description: Option<String>,
    pub assignment_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub assigned_routine: AssignedRoutine,
    pub exercises_copied: u64,
    /// Fresh login code for the athlete.
    pub otp: OtpCode,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/assigned-routines
///
/// Copies the routine's exercises in order, then issues a new code for the
/// athlete so they can open it.
///
/// The assignment commits before the code is issued. If issuing fails the
/// request errors but the assignment stays; a fresh code can then be issued
/// through `POST /api/v1/athletes/{id}/otp`.
pub async fn assign(
    RequireTrainer(auth): RequireTrainer,
    State(state): State<AppState>,
    Json(input): Json<AssignRoutineRequest>,
) -> AppResult<impl IntoResponse> {
    let routine = owned_routine(&state.pool, &auth, input.routine_id).await?;
    let athlete = coached_athlete(&state.pool, &auth, input.athlete_id).await?;

    let description = match input.description.filter(|d| !d.trim().is_empty()) {
        Some(description) => {
            validate_description(&description)?;
            Some(description)
        }
        None => routine.description.clone(),
    };
    let assignment_date = input.assignment_date.as_deref().map(parse_date).transpose()?;

    let (assigned_routine, exercises_copied) = AssignedRoutineRepo::assign(
        &state.pool,
        &CreateAssignedRoutine {
            routine_id: routine.id,
            athlete_id: athlete.id,
            description,
            assignment_date,
        },
    )
    .await?;

    let store = PgOtpStore::new(state.pool.clone());
    let otp = OtpIssuer::new(&store, state.config.otp.policy())
        .issue(athlete.id)
        .await
        .inspect_err(|err| {
            tracing::warn!(
                assigned_routine_id = assigned_routine.id,
                athlete_id = athlete.id,
                error = %err,
                "Routine assigned but OTP issue failed",
            );
        })?;

    tracing::info!(
        assigned_routine_id = assigned_routine.id,
        routine_id = routine.id,
        athlete_id = athlete.id,
        exercises_copied,
        user_id = auth.user_id,
        "Routine assigned",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AssignmentResponse {
                assigned_routine,
                exercises_copied,
                otp,
            },
        }),
    ))
}

/// GET /api/v1/assigned-routines/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let assignment = viewable_assignment(&state.pool, &auth, id).await?;
    Ok(Json(DataResponse {
        data: assignment.assigned,
    }))
}

/// DELETE /api/v1/assigned-routines/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    owned_assignment(&state.pool, &auth, id).await?;
    if !AssignedRoutineRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "AssignedRoutine",
            id,
        }));
    }
    tracing::info!(assigned_routine_id = id, user_id = auth.user_id, "Assigned routine deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/assigned-routines/{id}/exercises
pub async fn list_exercises(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    viewable_assignment(&state.pool, &auth, id).await?;
    let exercises = AssignedExerciseRepo::list_by_assigned_routine(&state.pool, id).await?;
    Ok(Json(DataResponse { data: exercises }))
}

/// POST /api/v1/assigned-routines/{id}/exercises
pub async fn insert_exercise(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<InsertExerciseRequest>,
) -> AppResult<impl IntoResponse> {
    owned_assignment(&state.pool, &auth, id).await?;
    let desired_order = input.validate()?;
    require_exercise(&state.pool, input.exercise_id).await?;

    let payload = AssignedExercisePayload {
        exercise_id: input.exercise_id,
        reps: input.reps,
        series: input.series,
        weight_kg: input.weight_kg,
        rest_time_s: input.rest_time_s,
    };

    let store = AssignedExerciseStore::new(state.pool.clone());
    let item = OrderedListManager::new(&store)
        .insert(id, payload, desired_order)
        .await?;

    tracing::info!(
        assigned_routine_id = id,
        item_id = item.id,
        order = item.order,
        user_id = auth.user_id,
        "Exercise added to assigned routine",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// POST /api/v1/assigned-routines/{id}/complete
///
/// The assignee must hold an active, unexpired code. Writes the history
/// snapshot and marks the routine completed.
pub async fn complete(
    RequireAthlete(auth): RequireAthlete,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let assignment = any_assignment(&state.pool, id).await?;
    if !assignment.is_assignee(&auth) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only complete your own routines".into(),
        )));
    }

    let store = PgOtpStore::new(state.pool.clone());
    let has_code = OtpIssuer::new(&store, state.config.otp.policy())
        .has_valid_code(auth.user_id)
        .await?;
    if !has_code {
        return Err(AppError::Core(CoreError::Forbidden(
            "A valid OTP is required to complete a routine".into(),
        )));
    }

    if assignment.assigned.completed {
        return Err(already_completed());
    }
    let history = HistoryRepo::record_completion(&state.pool, id)
        .await?
        .ok_or_else(already_completed)?;

    tracing::info!(
        assigned_routine_id = id,
        routine_history_id = history.id,
        athlete_id = auth.user_id,
        "Routine completed",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: history })))
}

fn already_completed() -> AppError {
    AppError::Core(CoreError::Conflict(
        "This routine has already been completed".into(),
    ))
}

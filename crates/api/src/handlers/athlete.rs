//! Handlers for the `/athletes` resource and its per-athlete sub-resources
//! (one-time codes, weight history, assigned routines, completion history).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use coach_core::error::CoreError;
use coach_core::otp::OtpIssuer;
use coach_core::types::DbId;
use coach_core::validation::{
    parse_date, validate_email, validate_person_name, validate_phone, validate_required,
    validate_weight_kg,
};
use coach_db::models::athlete::{Athlete, CreateAthlete, UpdateAthlete};
use coach_db::models::history::CreateWeightHistory;
use coach_db::models::otp::OtpCode;
use coach_db::repositories::{AssignedRoutineRepo, AthleteRepo, HistoryRepo};
use coach_db::stores::PgOtpStore;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::guard::{coached_athlete, find_athlete, viewable_athlete};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireTrainer;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /athletes`. `trainer_id` is only read for admins;
/// trainers always create athletes for themselves.
#[derive(Debug, Deserialize)]
pub struct CreateAthleteRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date_birth: String,
    pub goals: String,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub gender: Option<String>,
    pub injuries: Option<String>,
    pub trainer_id: Option<DbId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAthleteRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_birth: Option<String>,
    pub goals: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub gender: Option<String>,
    pub injuries: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordWeightRequest {
    pub weight_kg: f64,
}

/// A newly created athlete together with their first login code.
#[derive(Debug, Serialize)]
pub struct CreatedAthlete {
    pub athlete: Athlete,
    pub otp: OtpCode,
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/athletes
///
/// Creates the athlete and issues their first one-time code.
pub async fn create(
    RequireTrainer(auth): RequireTrainer,
    State(state): State<AppState>,
    Json(input): Json<CreateAthleteRequest>,
) -> AppResult<impl IntoResponse> {
    validate_person_name(&input.name)?;
    validate_email(&input.email)?;
    validate_phone(&input.phone)?;
    let date_birth = parse_date(&input.date_birth)?;
    validate_required("goals", &input.goals)?;
    validate_body(input.weight, input.height)?;

    let trainer_id = if auth.is_admin() {
        input.trainer_id
    } else {
        Some(auth.user_id)
    };

    let create = CreateAthlete {
        name: input.name.trim().to_string(),
        email: input.email.trim().to_lowercase(),
        phone: input.phone,
        date_birth,
        goals: input.goals,
        weight: input.weight,
        height: input.height,
        gender: input.gender,
        injuries: input.injuries,
        trainer_id,
    };
    let athlete = AthleteRepo::create(&state.pool, &create).await?;

    let store = PgOtpStore::new(state.pool.clone());
    let otp = OtpIssuer::new(&store, state.config.otp.policy())
        .issue(athlete.id)
        .await?;

    tracing::info!(
        athlete_id = athlete.id,
        trainer_id = ?athlete.trainer_id,
        user_id = auth.user_id,
        "Athlete created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedAthlete { athlete, otp },
        }),
    ))
}

/// GET /api/v1/athletes
///
/// Trainers see their own athletes; admins see everyone.
pub async fn list(
    RequireTrainer(auth): RequireTrainer,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let athletes = if auth.is_admin() {
        AthleteRepo::list(&state.pool).await?
    } else {
        AthleteRepo::list_by_trainer(&state.pool, auth.user_id).await?
    };
    Ok(Json(DataResponse { data: athletes }))
}

/// GET /api/v1/athletes/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let athlete = viewable_athlete(&state.pool, &auth, id).await?;
    Ok(Json(DataResponse { data: athlete }))
}

/// PATCH /api/v1/athletes/{id}
///
/// The owning trainer or the athlete themself.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAthleteRequest>,
) -> AppResult<impl IntoResponse> {
    viewable_athlete(&state.pool, &auth, id).await?;

    if let Some(name) = &input.name {
        validate_person_name(name)?;
    }
    if let Some(email) = &input.email {
        validate_email(email)?;
    }
    if let Some(phone) = &input.phone {
        validate_phone(phone)?;
    }
    if let Some(goals) = &input.goals {
        validate_required("goals", goals)?;
    }
    validate_body(input.weight, input.height)?;

    let update = UpdateAthlete {
        name: input.name.map(|n| n.trim().to_string()),
        email: input.email.map(|e| e.trim().to_lowercase()),
        phone: input.phone,
        date_birth: input.date_birth.as_deref().map(parse_date).transpose()?,
        goals: input.goals,
        weight: input.weight,
        height: input.height,
        gender: input.gender,
        injuries: input.injuries,
    };

    let athlete = AthleteRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Athlete",
            id,
        }))?;

    tracing::info!(athlete_id = id, user_id = auth.user_id, "Athlete updated");
    Ok(Json(DataResponse { data: athlete }))
}

/// DELETE /api/v1/athletes/{id}
///
/// Owning trainer only. Codes, assignments and history cascade.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    coached_athlete(&state.pool, &auth, id).await?;
    if !AthleteRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Athlete",
            id,
        }));
    }
    tracing::info!(athlete_id = id, user_id = auth.user_id, "Athlete deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// One-time codes
// ---------------------------------------------------------------------------

/// POST /api/v1/athletes/{id}/otp
///
/// Issue a fresh code, deactivating the previous one.
pub async fn issue_otp(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    coached_athlete(&state.pool, &auth, id).await?;

    let store = PgOtpStore::new(state.pool.clone());
    let otp = OtpIssuer::new(&store, state.config.otp.policy())
        .issue(id)
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: otp })))
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// GET /api/v1/athletes/{id}/weight-history
pub async fn list_weight_history(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    viewable_athlete(&state.pool, &auth, id).await?;
    let entries = HistoryRepo::list_weight(&state.pool, id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/athletes/{id}/weight-history
///
/// Only the athlete records their own weight. The entry is dated today.
pub async fn record_weight(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RecordWeightRequest>,
) -> AppResult<impl IntoResponse> {
    find_athlete(&state.pool, id).await?;
    if !(auth.is_athlete() && auth.user_id == id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the athlete can record their weight".into(),
        )));
    }
    validate_weight_kg(input.weight_kg)?;

    let entry = HistoryRepo::create_weight(
        &state.pool,
        &CreateWeightHistory {
            athlete_id: id,
            recorded_on: Utc::now().date_naive(),
            weight_kg: input.weight_kg,
        },
    )
    .await?;

    tracing::info!(athlete_id = id, weight_kg = entry.weight_kg, "Weight recorded");
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// GET /api/v1/athletes/{id}/assigned-routines
pub async fn list_assigned_routines(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    viewable_athlete(&state.pool, &auth, id).await?;
    let assigned = AssignedRoutineRepo::list_by_athlete(&state.pool, id).await?;
    Ok(Json(DataResponse { data: assigned }))
}

/// GET /api/v1/athletes/{id}/routine-history
pub async fn list_routine_history(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    viewable_athlete(&state.pool, &auth, id).await?;
    let routines = HistoryRepo::list_routines(&state.pool, id).await?;
    Ok(Json(DataResponse { data: routines }))
}

/// GET /api/v1/athletes/{id}/exercise-history
pub async fn list_exercise_history(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    viewable_athlete(&state.pool, &auth, id).await?;
    let exercises = HistoryRepo::list_exercises(&state.pool, id).await?;
    Ok(Json(DataResponse { data: exercises }))
}

fn validate_body(weight: Option<f64>, height: Option<f64>) -> AppResult<()> {
    if let Some(weight) = weight {
        validate_weight_kg(weight)?;
    }
    if let Some(height) = height {
        if !(height.is_finite() && height > 0.0) {
            return Err(AppError::Core(CoreError::Validation(
                "Invalid height. Height must be a positive number".into(),
            )));
        }
    }
    Ok(())
}

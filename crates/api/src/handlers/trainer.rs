//! Handlers for the `/trainers` resource.
//!
//! Signup is public; everything else is limited to the trainer themself or
//! an admin.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coach_core::error::CoreError;
use coach_core::types::DbId;
use coach_core::validation::{
    parse_date, validate_email, validate_password, validate_person_name, validate_phone,
};
use coach_db::models::trainer::{CreateTrainer, TrainerResponse, UpdateTrainer};
use coach_db::repositories::{AthleteRepo, RoutineRepo, TrainerRepo};
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /trainers`. Dates use `DD/MM/YYYY`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub date_birth: Option<String>,
}

/// Request body for `PATCH /trainers/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTrainerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub date_birth: Option<String>,
}

/// POST /api/v1/trainers
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    validate_person_name(&input.name)?;
    validate_email(&input.email)?;
    validate_password(&input.password)?;
    if let Some(phone) = &input.phone {
        validate_phone(phone)?;
    }
    let date_birth = input.date_birth.as_deref().map(parse_date).transpose()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateTrainer {
        name: input.name.trim().to_string(),
        email: input.email.trim().to_lowercase(),
        password_hash,
        phone: input.phone,
        date_birth,
    };
    let trainer = TrainerRepo::create(&state.pool, &create).await?;

    tracing::info!(trainer_id = trainer.id, "Trainer signed up");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: TrainerResponse::from(trainer),
        }),
    ))
}

/// GET /api/v1/trainers
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let trainers: Vec<TrainerResponse> = TrainerRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(TrainerResponse::from)
        .collect();
    Ok(Json(DataResponse { data: trainers }))
}

/// GET /api/v1/trainers/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_self_or_admin(&auth, id)?;
    let trainer = TrainerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Trainer",
            id,
        }))?;
    Ok(Json(DataResponse {
        data: TrainerResponse::from(trainer),
    }))
}

/// PATCH /api/v1/trainers/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTrainerRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_self_or_admin(&auth, id)?;

    if let Some(name) = &input.name {
        validate_person_name(name)?;
    }
    if let Some(email) = &input.email {
        validate_email(email)?;
    }
    if let Some(phone) = &input.phone {
        validate_phone(phone)?;
    }
    let password_hash = match &input.password {
        Some(password) => {
            validate_password(password)?;
            Some(hash_password(password).map_err(|e| {
                AppError::InternalError(format!("Password hashing error: {e}"))
            })?)
        }
        None => None,
    };

    let update = UpdateTrainer {
        name: input.name.map(|n| n.trim().to_string()),
        email: input.email.map(|e| e.trim().to_lowercase()),
        password_hash,
        phone: input.phone,
        date_birth: input.date_birth.as_deref().map(parse_date).transpose()?,
    };

    let trainer = TrainerRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Trainer",
            id,
        }))?;

    tracing::info!(trainer_id = id, user_id = auth.user_id, "Trainer updated");
    Ok(Json(DataResponse {
        data: TrainerResponse::from(trainer),
    }))
}

/// DELETE /api/v1/trainers/{id}
///
/// Routines cascade; athletes stay and lose their trainer.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_self_or_admin(&auth, id)?;
    if !TrainerRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Trainer",
            id,
        }));
    }
    tracing::info!(trainer_id = id, user_id = auth.user_id, "Trainer deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/trainers/{id}/athletes
pub async fn list_athletes(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_self_or_admin(&auth, id)?;
    let athletes = AthleteRepo::list_by_trainer(&state.pool, id).await?;
    Ok(Json(DataResponse { data: athletes }))
}

/// GET /api/v1/trainers/{id}/routines
pub async fn list_routines(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_self_or_admin(&auth, id)?;
    let routines = RoutineRepo::list(&state.pool, Some(id)).await?;
    Ok(Json(DataResponse { data: routines }))
}

fn ensure_self_or_admin(auth: &AuthUser, trainer_id: DbId) -> AppResult<()> {
    if auth.is_admin() || (auth.is_trainer() && auth.user_id == trainer_id) {
        return Ok(());
    }
    Err(AppError::Core(CoreError::Forbidden(
        "You can only access your own trainer account".into(),
    )))
}

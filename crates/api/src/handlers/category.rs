//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coach_core::error::CoreError;
use coach_core::types::DbId;
use coach_core::validation::validate_required;
use coach_db::models::category::{CreateCategory, UpdateCategory};
use coach_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireTrainer};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/categories
pub async fn create(
    RequireTrainer(auth): RequireTrainer,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_required("name", &input.name)?;
    let category = CategoryRepo::create(
        &state.pool,
        &CreateCategory {
            name: input.name.trim().to_string(),
        },
    )
    .await?;
    tracing::info!(category_id = category.id, user_id = auth.user_id, "Category created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/categories
pub async fn list(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    RequireAuth(_auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(DataResponse { data: category }))
}

/// PATCH /api/v1/categories/{id}
pub async fn update(
    RequireTrainer(auth): RequireTrainer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_required("name", name)?;
    }
    let update = UpdateCategory {
        name: input.name.map(|n| n.trim().to_string()),
    };
    let category = CategoryRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    tracing::info!(category_id = id, user_id = auth.user_id, "Category updated");
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// Exercises in the category keep existing without one.
pub async fn delete(
    RequireTrainer(auth): RequireTrainer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }
    tracing::info!(category_id = id, user_id = auth.user_id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}

//! Role gates for handlers.
//!
//! Each extractor wraps [`AuthUser`] and answers 403 when the session's role
//! is not allowed. Ownership of individual rows is checked in the handlers.
//!
//! ```ignore
//! async fn assign(RequireTrainer(user): RequireTrainer) -> AppResult<Json<()>> {
//!     Ok(Json(()))
//! }
//! ```

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use coach_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Resolve the session and check its role against `allowed`.
async fn gate(
    parts: &mut Parts,
    state: &AppState,
    allowed: fn(&AuthUser) -> bool,
    denied: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if allowed(&user) {
        Ok(user)
    } else {
        tracing::debug!(user_id = user.user_id, role = %user.role, denied, "Role gate rejected");
        Err(AppError::Core(CoreError::Forbidden(denied.to_string())))
    }
}

/// Admins only.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        gate(parts, state, AuthUser::is_admin, "Admin role required")
            .await
            .map(Self)
    }
}

/// Trainers, and admins acting on their behalf.
pub struct RequireTrainer(pub AuthUser);

impl FromRequestParts<AppState> for RequireTrainer {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        gate(
            parts,
            state,
            |u| u.is_trainer() || u.is_admin(),
            "Trainer or admin role required",
        )
        .await
        .map(Self)
    }
}

/// Athletes only.
pub struct RequireAthlete(pub AuthUser);

impl FromRequestParts<AppState> for RequireAthlete {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        gate(parts, state, AuthUser::is_athlete, "Athlete role required")
            .await
            .map(Self)
    }
}

/// Any signed-in user. Reads as intent at the call site where [`AuthUser`]
/// alone would look like the user is needed.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        gate(parts, state, |_| true, "").await.map(Self)
    }
}

//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use coach_core::error::CoreError;
use coach_core::roles::{ROLE_ADMIN, ROLE_ATHLETE, ROLE_TRAINER};
use coach_core::types::DbId;

use crate::auth::cookie::token_from_cookie_header;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the session token.
///
/// The token is read from `Authorization: Bearer <token>` first and from the
/// `token` cookie otherwise.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Id of the admin, trainer or athlete row (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name.
    pub role: String,
    /// Display name carried in the token.
    pub name: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    pub fn is_trainer(&self) -> bool {
        self.role == ROLE_TRAINER
    }

    pub fn is_athlete(&self) -> bool {
        self.role == ROLE_ATHLETE
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = header.to_str().ok().and_then(|v| v.strip_prefix("Bearer "));
    match value {
        Some(token) => Ok(Some(token)),
        None => Err(AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))),
    }
}

fn cookie_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(token_from_cookie_header)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match bearer_token(parts)? {
            Some(token) => token,
            None => cookie_token(parts).ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing session token".into(),
                ))
            })?,
        };

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
            name: claims.name,
        })
    }
}

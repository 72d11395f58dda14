//! Handlers for the `/auth` resource (logins, session info, logout).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coach_core::error::CoreError;
use coach_core::otp::OtpIssuer;
use coach_core::roles::{ROLE_ADMIN, ROLE_ATHLETE, ROLE_TRAINER};
use coach_core::types::DbId;
use coach_db::repositories::{AdminRepo, AthleteRepo, TrainerRepo};
use coach_db::stores::PgOtpStore;
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{clear_cookie, session_cookie};
use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/admin` and `POST /auth/trainer`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/athlete`.
#[derive(Debug, Deserialize)]
pub struct OtpLoginRequest {
    pub otp_code: String,
}

/// Successful authentication response. The token is also set as a cookie.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Session lifetime in seconds.
    pub expires_in: i64,
    pub user: SessionUser,
}

/// The identity a session token carries.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: DbId,
    pub role: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/admin
pub async fn admin_login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let admin = AdminRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid_credentials)?;

    check_password(&input.password, &admin.password_hash)?;

    tracing::info!(user_id = admin.id, "Admin logged in");
    start_session(&state, admin.id, ROLE_ADMIN, &admin.email)
}

/// POST /api/v1/auth/trainer
pub async fn trainer_login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let trainer = TrainerRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid_credentials)?;

    check_password(&input.password, &trainer.password_hash)?;

    tracing::info!(user_id = trainer.id, "Trainer logged in");
    start_session(&state, trainer.id, ROLE_TRAINER, &trainer.name)
}

/// POST /api/v1/auth/athlete
///
/// Exchange an active, unexpired one-time code for a session.
pub async fn athlete_login(
    State(state): State<AppState>,
    Json(input): Json<OtpLoginRequest>,
) -> AppResult<impl IntoResponse> {
    let code = input.otp_code.trim().to_uppercase();

    let store = PgOtpStore::new(state.pool.clone());
    let athlete_id = OtpIssuer::new(&store, state.config.otp.policy())
        .validate(&code)
        .await?;

    let athlete = AthleteRepo::find_by_id(&state.pool, athlete_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Athlete for this code no longer exists".into(),
            ))
        })?;

    tracing::info!(user_id = athlete.id, "Athlete logged in with OTP");
    start_session(&state, athlete.id, ROLE_ATHLETE, &athlete.name)
}

/// GET /api/v1/auth/me
pub async fn me(auth: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: SessionUser {
            id: auth.user_id,
            role: auth.role,
            name: auth.name,
        },
    }))
}

/// POST /api/v1/auth/logout
///
/// Sessions are stateless, so logging out only clears the cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<impl IntoResponse> {
    tracing::info!(user_id = auth.user_id, role = %auth.role, "Logged out");
    Ok((
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, clear_cookie(state.config.cookie_secure))],
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

fn check_password(password: &str, hash: &str) -> AppResult<()> {
    let valid = verify_password(password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        return Err(invalid_credentials());
    }
    Ok(())
}

/// Mint a token and return it in the body and the `token` cookie.
fn start_session(
    state: &AppState,
    user_id: DbId,
    role: &str,
    name: &str,
) -> AppResult<impl IntoResponse> {
    let jwt = &state.config.jwt;
    let token = generate_token(user_id, role, name, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let cookie = session_cookie(&token, jwt.expiry_secs(), state.config.cookie_secure);

    Ok((
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            token,
            expires_in: jwt.expiry_secs(),
            user: SessionUser {
                id: user_id,
                role: role.to_string(),
                name: name.to_string(),
            },
        }),
    ))
}

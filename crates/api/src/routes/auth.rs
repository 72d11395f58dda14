//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /admin    -> admin_login
/// POST /trainer  -> trainer_login
/// POST /athlete  -> athlete_login (OTP)
/// GET  /me       -> me (requires auth)
/// POST /logout   -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", post(auth::admin_login))
        .route("/trainer", post(auth::trainer_login))
        .route("/athlete", post(auth::athlete_login))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout))
}

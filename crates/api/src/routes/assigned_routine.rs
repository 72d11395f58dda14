//! Route definitions for the `/assigned-routines` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assigned_routine;
use crate::state::AppState;

/// Routes mounted at `/assigned-routines`.
///
/// ```text
/// POST   /                 -> assign
/// GET    /{id}             -> get_by_id
/// DELETE /{id}             -> delete
/// GET    /{id}/exercises   -> list_exercises
/// POST   /{id}/exercises   -> insert_exercise
/// POST   /{id}/complete    -> complete (athlete with a valid OTP)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(assigned_routine::assign))
        .route(
            "/{id}",
            get(assigned_routine::get_by_id).delete(assigned_routine::delete),
        )
        .route(
            "/{id}/exercises",
            get(assigned_routine::list_exercises).post(assigned_routine::insert_exercise),
        )
        .route("/{id}/complete", post(assigned_routine::complete))
}

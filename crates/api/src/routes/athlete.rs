//! Route definitions for the `/athletes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::athlete;
use crate::state::AppState;

/// Routes mounted at `/athletes`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create (also issues the first OTP)
/// GET    /{id}                      -> get_by_id
/// PATCH  /{id}                      -> update
/// DELETE /{id}                      -> delete
/// POST   /{id}/otp                  -> issue_otp
/// GET    /{id}/weight-history       -> list_weight_history
/// POST   /{id}/weight-history       -> record_weight
/// GET    /{id}/assigned-routines    -> list_assigned_routines
/// GET    /{id}/routine-history      -> list_routine_history
/// GET    /{id}/exercise-history     -> list_exercise_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(athlete::list).post(athlete::create))
        .route(
            "/{id}",
            get(athlete::get_by_id)
                .patch(athlete::update)
                .delete(athlete::delete),
        )
        .route("/{id}/otp", post(athlete::issue_otp))
        .route(
            "/{id}/weight-history",
            get(athlete::list_weight_history).post(athlete::record_weight),
        )
        .route(
            "/{id}/assigned-routines",
            get(athlete::list_assigned_routines),
        )
        .route("/{id}/routine-history", get(athlete::list_routine_history))
        .route("/{id}/exercise-history", get(athlete::list_exercise_history))
}

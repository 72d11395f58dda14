//! Route definitions for the `/trainers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::trainer;
use crate::state::AppState;

/// Routes mounted at `/trainers`.
///
/// ```text
/// POST   /                -> signup (public)
/// GET    /                -> list (admin)
/// GET    /{id}            -> get_by_id
/// PATCH  /{id}            -> update
/// DELETE /{id}            -> delete
/// GET    /{id}/athletes   -> list_athletes
/// GET    /{id}/routines   -> list_routines
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trainer::list).post(trainer::signup))
        .route(
            "/{id}",
            get(trainer::get_by_id)
                .patch(trainer::update)
                .delete(trainer::delete),
        )
        .route("/{id}/athletes", get(trainer::list_athletes))
        .route("/{id}/routines", get(trainer::list_routines))
}

//! Route definitions for the `/routines` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::routine;
use crate::state::AppState;

/// Routes mounted at `/routines`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PATCH  /{id}             -> update
/// DELETE /{id}             -> delete
/// GET    /{id}/exercises   -> list_exercises
/// POST   /{id}/exercises   -> insert_exercise
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(routine::list).post(routine::create))
        .route(
            "/{id}",
            get(routine::get_by_id)
                .patch(routine::update)
                .delete(routine::delete),
        )
        .route(
            "/{id}/exercises",
            get(routine::list_exercises).post(routine::insert_exercise),
        )
}

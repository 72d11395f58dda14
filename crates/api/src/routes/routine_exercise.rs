use axum::routing::get;
use axum::Router;

use crate::handlers::routine_exercise;
use crate::state::AppState;

/// Routes mounted at `/routine-exercises`.
///
/// ```text
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update (desired_order and/or payload)
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(routine_exercise::get_by_id)
            .patch(routine_exercise::update)
            .delete(routine_exercise::delete),
    )
}

use axum::routing::patch;
use axum::Router;

use crate::handlers::assigned_exercise;
use crate::state::AppState;

/// Routes mounted at `/assigned-exercises`.
///
/// ```text
/// PATCH  /{id}    -> update (field rules depend on role)
/// DELETE /{id}    -> delete (owning trainer)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        patch(assigned_exercise::update).delete(assigned_exercise::delete),
    )
}

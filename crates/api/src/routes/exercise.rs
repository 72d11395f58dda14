//! Route definitions for the `/exercises` catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::exercise;
use crate::state::AppState;

/// Routes mounted at `/exercises`.
///
/// ```text
/// GET    /        -> list (?category_id=)
/// POST   /        -> create (trainer or admin)
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update (trainer or admin)
/// DELETE /{id}    -> delete (trainer or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(exercise::list).post(exercise::create))
        .route(
            "/{id}",
            get(exercise::get_by_id)
                .patch(exercise::update)
                .delete(exercise::delete),
        )
}

//! Route definitions for the `/categories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create (trainer or admin)
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update (trainer or admin)
/// DELETE /{id}    -> delete (trainer or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(category::list).post(category::create))
        .route(
            "/{id}",
            get(category::get_by_id)
                .patch(category::update)
                .delete(category::delete),
        )
}

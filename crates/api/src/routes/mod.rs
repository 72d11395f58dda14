pub mod assigned_exercise;
pub mod assigned_routine;
pub mod athlete;
pub mod auth;
pub mod category;
pub mod exercise;
pub mod health;
pub mod routine;
pub mod routine_exercise;
pub mod trainer;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/admin                                 admin login (public)
/// /auth/trainer                               trainer login (public)
/// /auth/athlete                               OTP exchange (public)
/// /auth/me                                    session info (auth)
/// /auth/logout                                clear session cookie (auth)
///
/// /trainers                                   signup (public), list (admin)
/// /trainers/{id}                              get, update, delete (self or admin)
/// /trainers/{id}/athletes                     athletes of a trainer
/// /trainers/{id}/routines                     routines of a trainer
///
/// /athletes                                   create, list (trainer)
/// /athletes/{id}                              get, update, delete
/// /athletes/{id}/otp                          issue a new code (POST)
/// /athletes/{id}/weight-history               list, record
/// /athletes/{id}/assigned-routines            list
/// /athletes/{id}/routine-history              list
/// /athletes/{id}/exercise-history             list
///
/// /categories                                 list, create
/// /categories/{id}                            get, update, delete
///
/// /exercises                                  list (?category_id=), create
/// /exercises/{id}                             get, update, delete
///
/// /routines                                   list, create
/// /routines/{id}                              get, update, delete
/// /routines/{id}/exercises                    list, insert
///
/// /routine-exercises/{id}                     get, move + update, delete
///
/// /assigned-routines                          assign (POST)
/// /assigned-routines/{id}                     get, delete
/// /assigned-routines/{id}/exercises           list, insert
/// /assigned-routines/{id}/complete            complete (POST, athlete)
///
/// /assigned-exercises/{id}                    move + update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/trainers", trainer::router())
        .nest("/athletes", athlete::router())
        .nest("/categories", category::router())
        .nest("/exercises", exercise::router())
        .nest("/routines", routine::router())
        .nest("/routine-exercises", routine_exercise::router())
        .nest("/assigned-routines", assigned_routine::router())
        .nest("/assigned-exercises", assigned_exercise::router())
}

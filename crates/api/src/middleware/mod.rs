//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a Bearer token
//!   or the `token` cookie.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireTrainer`] -- Requires `trainer` or `admin` role.
//! - [`rbac::RequireAthlete`] -- Requires the `athlete` role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.

pub mod auth;
pub mod rbac;

//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource. Handlers
//! validate input with `coach_core::validation`, check ownership with
//! `coach_core::access` (via [`guard`]), delegate to the repositories and
//! stores in `coach_db`, and map errors via [`crate::error::AppError`].

pub mod assigned_exercise;
pub mod assigned_routine;
pub mod athlete;
pub mod auth;
pub mod category;
pub mod exercise;
pub mod guard;
pub mod routine;
pub mod routine_exercise;
pub mod trainer;

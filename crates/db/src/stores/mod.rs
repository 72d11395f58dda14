//! Postgres implementations of the `coach_core` store traits.
//!
//! Each store owns a clone of the pool (an `Arc` internally) and delegates
//! to the matching repository.

mod assigned_exercise_store;
mod otp_store;
mod routine_exercise_store;

pub use assigned_exercise_store::AssignedExerciseStore;
pub use otp_store::PgOtpStore;
pub use routine_exercise_store::RoutineExerciseStore;

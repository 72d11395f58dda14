//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - An update DTO (all `Option` fields) for patches, where the entity is patchable
//!
//! Account rows carry a password hash and are never serialized directly; they
//! expose a `*Response` struct instead.

pub mod admin;
pub mod assigned_exercise;
pub mod assigned_routine;
pub mod athlete;
pub mod category;
pub mod exercise;
pub mod history;
pub mod otp;
pub mod routine;
pub mod routine_exercise;
pub mod trainer;

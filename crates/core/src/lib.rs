//! Domain logic shared by the coach backend crates.
//!
//! This crate has no database or HTTP dependencies. Persistence is reached
//! through the store traits in [`ordering`] and [`otp`], which the `db`
//! crate implements for Postgres.

pub mod access;
pub mod error;
pub mod ordering;
pub mod otp;
pub mod roles;
pub mod types;
pub mod validation;

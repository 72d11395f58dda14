//! Well-known role name constants.
//!
//! These are embedded in session tokens and must match the checks performed
//! by the API's RBAC extractors.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TRAINER: &str = "trainer";
pub const ROLE_ATHLETE: &str = "athlete";

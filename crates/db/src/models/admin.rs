//! Administrator accounts.

use coach_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full row from the `admins` table, including the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Admin as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct AdminResponse {
    pub id: DbId,
    pub email: String,
    pub created_at: Timestamp,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            created_at: admin.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdmin {
    pub email: String,
    pub password_hash: String,
}

//! Trainer accounts.

use chrono::NaiveDate;
use coach_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full row from the `trainers` table.
///
/// Contains the password hash -- use [`TrainerResponse`] for API output.
#[derive(Debug, Clone, FromRow)]
pub struct Trainer {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub date_birth: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Trainer as returned by the API (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct TrainerResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_birth: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Trainer> for TrainerResponse {
    fn from(t: Trainer) -> Self {
        Self {
            id: t.id,
            name: t.name,
            email: t.email,
            phone: t.phone,
            date_birth: t.date_birth,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrainer {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub date_birth: Option<NaiveDate>,
}

/// All fields optional. A new password arrives already hashed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTrainer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub date_birth: Option<NaiveDate>,
}

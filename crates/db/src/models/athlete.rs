//! Athlete profiles. Athletes sign in with one-time codes, so there is no
//! password column.

use chrono::NaiveDate;
use coach_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `athletes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Athlete {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date_birth: NaiveDate,
    pub goals: String,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub gender: Option<String>,
    pub injuries: Option<String>,
    pub trainer_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAthlete {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date_birth: NaiveDate,
    pub goals: String,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub gender: Option<String>,
    pub injuries: Option<String>,
    pub trainer_id: Option<DbId>,
}

/// DTO for patching an athlete. The owning trainer is not patchable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAthlete {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_birth: Option<NaiveDate>,
    pub goals: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub gender: Option<String>,
    pub injuries: Option<String>,
}

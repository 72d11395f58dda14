//! One-time passcodes bound to an athlete.

use coach_core::otp::OtpRecordView;
use coach_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `otp_codes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OtpCode {
    pub id: DbId,
    pub athlete_id: DbId,
    pub code: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OtpRecordView for OtpCode {
    fn athlete_id(&self) -> DbId {
        self.athlete_id
    }
    fn expires_at(&self) -> Timestamp {
        self.expires_at
    }
}

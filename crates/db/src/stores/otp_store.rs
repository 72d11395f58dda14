use async_trait::async_trait;
use coach_core::otp::{GeneratedOtp, OtpStore};
use coach_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::otp::OtpCode;
use crate::repositories::{AthleteRepo, OtpRepo};

/// `otp_codes` backed store for the OTP issuer.
pub struct PgOtpStore {
    pool: PgPool,
}

impl PgOtpStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OtpStore for PgOtpStore {
    type Record = OtpCode;
    type Error = StoreError;

    async fn athlete_exists(&self, athlete_id: DbId) -> Result<bool, StoreError> {
        Ok(AthleteRepo::exists(&self.pool, athlete_id).await?)
    }

    async fn deactivate_for_athlete(&self, athlete_id: DbId) -> Result<u64, StoreError> {
        Ok(OtpRepo::deactivate_for_athlete(&self.pool, athlete_id).await?)
    }

    async fn code_in_use(&self, code: &str) -> Result<bool, StoreError> {
        Ok(OtpRepo::code_in_use(&self.pool, code).await?)
    }

    async fn insert_active(
        &self,
        athlete_id: DbId,
        otp: &GeneratedOtp,
    ) -> Result<Option<OtpCode>, StoreError> {
        Ok(OtpRepo::insert_active(&self.pool, athlete_id, otp).await?)
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<OtpCode>, StoreError> {
        Ok(OtpRepo::find_active_by_code(&self.pool, code).await?)
    }

    async fn find_active_for_athlete(
        &self,
        athlete_id: DbId,
    ) -> Result<Option<OtpCode>, StoreError> {
        Ok(OtpRepo::find_active_for_athlete(&self.pool, athlete_id).await?)
    }
}

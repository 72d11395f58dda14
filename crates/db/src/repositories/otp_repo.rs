//! Repository for the `otp_codes` table.
//!
//! The partial unique indexes `uq_otp_codes_active_athlete` and
//! `uq_otp_codes_active_code` hold the single-active invariants.

use coach_core::otp::GeneratedOtp;
use coach_core::types::DbId;
use sqlx::PgPool;

use crate::models::otp::OtpCode;

const COLUMNS: &str =
    "id, athlete_id, code, issued_at, expires_at, active, created_at, updated_at";

pub struct OtpRepo;

impl OtpRepo {
    /// Deactivate every active code of an athlete. Returns how many changed.
    pub async fn deactivate_for_athlete(
        pool: &PgPool,
        athlete_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE otp_codes SET active = false WHERE athlete_id = $1 AND active")
                .bind(athlete_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    pub async fn code_in_use(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM otp_codes WHERE code = $1 AND active)")
                .bind(code)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Make `otp` the athlete's only active code.
    ///
    /// Deactivation and insert share one transaction. Returns `None` when the
    /// code collides with another athlete's active code; nothing is changed.
    pub async fn insert_active(
        pool: &PgPool,
        athlete_id: DbId,
        otp: &GeneratedOtp,
    ) -> Result<Option<OtpCode>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("UPDATE otp_codes SET active = false WHERE athlete_id = $1 AND active")
            .bind(athlete_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO otp_codes (athlete_id, code, issued_at, expires_at, active) \
             VALUES ($1, $2, $3, $4, true) \
             ON CONFLICT DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, OtpCode>(&query)
            .bind(athlete_id)
            .bind(&otp.code)
            .bind(otp.issued_at)
            .bind(otp.expires_at)
            .fetch_optional(&mut *tx)
            .await?;

        match inserted {
            Some(row) => {
                tx.commit().await?;
                Ok(Some(row))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    pub async fn find_active_by_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<OtpCode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM otp_codes WHERE code = $1 AND active");
        sqlx::query_as::<_, OtpCode>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_active_for_athlete(
        pool: &PgPool,
        athlete_id: DbId,
    ) -> Result<Option<OtpCode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM otp_codes WHERE athlete_id = $1 AND active");
        sqlx::query_as::<_, OtpCode>(&query)
            .bind(athlete_id)
            .fetch_optional(pool)
            .await
    }
}

//! Repository for the `trainers` table.

use coach_core::types::DbId;
use sqlx::PgPool;

use crate::models::trainer::{CreateTrainer, Trainer, UpdateTrainer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, email, password_hash, phone, date_birth, created_at, updated_at";

/// Provides CRUD operations for trainers.
pub struct TrainerRepo;

impl TrainerRepo {
    /// Insert a new trainer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTrainer) -> Result<Trainer, sqlx::Error> {
        let query = format!(
            "INSERT INTO trainers (name, email, password_hash, phone, date_birth) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trainer>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.phone)
            .bind(input.date_birth)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Trainer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trainers WHERE id = $1");
        sqlx::query_as::<_, Trainer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a trainer by email (case-sensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Trainer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trainers WHERE email = $1");
        sqlx::query_as::<_, Trainer>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all trainers ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Trainer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trainers ORDER BY name, id");
        sqlx::query_as::<_, Trainer>(&query).fetch_all(pool).await
    }

    /// Update a trainer. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrainer,
    ) -> Result<Option<Trainer>, sqlx::Error> {
        let query = format!(
            "UPDATE trainers SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                password_hash = COALESCE($4, password_hash), \
                phone = COALESCE($5, phone), \
                date_birth = COALESCE($6, date_birth) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trainer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.phone)
            .bind(input.date_birth)
            .fetch_optional(pool)
            .await
    }

    /// Delete a trainer. Their routines cascade; their athletes are unlinked.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trainers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

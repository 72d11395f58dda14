//! Repository for the `athletes` table.

use coach_core::types::DbId;
use sqlx::PgPool;

use crate::models::athlete::{Athlete, CreateAthlete, UpdateAthlete};

const COLUMNS: &str = "id, name, email, phone, date_birth, goals, weight, height, gender, \
                       injuries, trainer_id, created_at, updated_at";

/// Provides CRUD operations for athletes.
pub struct AthleteRepo;

impl AthleteRepo {
    pub async fn create(pool: &PgPool, input: &CreateAthlete) -> Result<Athlete, sqlx::Error> {
        let query = format!(
            "INSERT INTO athletes \
                (name, email, phone, date_birth, goals, \
                 weight, height, gender, injuries, trainer_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Athlete>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.date_birth)
            .bind(&input.goals)
            .bind(input.weight)
            .bind(input.height)
            .bind(&input.gender)
            .bind(&input.injuries)
            .bind(input.trainer_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Athlete>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM athletes WHERE id = $1");
        sqlx::query_as::<_, Athlete>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM athletes WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// List every athlete ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Athlete>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM athletes ORDER BY name, id");
        sqlx::query_as::<_, Athlete>(&query).fetch_all(pool).await
    }

    /// List the athletes coached by one trainer, ordered by name.
    pub async fn list_by_trainer(
        pool: &PgPool,
        trainer_id: DbId,
    ) -> Result<Vec<Athlete>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM athletes WHERE trainer_id = $1 ORDER BY name, id");
        sqlx::query_as::<_, Athlete>(&query)
            .bind(trainer_id)
            .fetch_all(pool)
            .await
    }

    /// Update an athlete. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAthlete,
    ) -> Result<Option<Athlete>, sqlx::Error> {
        let query = format!(
            "UPDATE athletes SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                phone = COALESCE($4, phone), \
                date_birth = COALESCE($5, date_birth), \
                goals = COALESCE($6, goals), \
                weight = COALESCE($7, weight), \
                height = COALESCE($8, height), \
                gender = COALESCE($9, gender), \
                injuries = COALESCE($10, injuries) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Athlete>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.date_birth)
            .bind(&input.goals)
            .bind(input.weight)
            .bind(input.height)
            .bind(&input.gender)
            .bind(&input.injuries)
            .fetch_optional(pool)
            .await
    }

    /// Delete an athlete together with their codes, assignments and history.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM athletes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `routines` table.

use coach_core::types::DbId;
use sqlx::PgPool;

use crate::models::routine::{CreateRoutine, Routine, UpdateRoutine};

const COLUMNS: &str = "id, name, description, trainer_id, created_at, updated_at";

pub struct RoutineRepo;

impl RoutineRepo {
    pub async fn create(pool: &PgPool, input: &CreateRoutine) -> Result<Routine, sqlx::Error> {
        let query = format!(
            "INSERT INTO routines (name, description, trainer_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Routine>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.trainer_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Routine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM routines WHERE id = $1");
        sqlx::query_as::<_, Routine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM routines WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// List routines, newest first. `trainer_id` restricts to one owner.
    pub async fn list(
        pool: &PgPool,
        trainer_id: Option<DbId>,
    ) -> Result<Vec<Routine>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM routines \
             WHERE ($1::bigint IS NULL OR trainer_id = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Routine>(&query)
            .bind(trainer_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoutine,
    ) -> Result<Option<Routine>, sqlx::Error> {
        let query = format!(
            "UPDATE routines SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Routine>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a routine with its exercises and assignments.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM routines WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

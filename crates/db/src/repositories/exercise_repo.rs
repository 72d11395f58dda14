//! Repository for the `exercises` table.

use coach_core::types::DbId;
use sqlx::PgPool;

use crate::models::exercise::{CreateExercise, Exercise, UpdateExercise};

const COLUMNS: &str = "id, name, description, img_url, category_id, created_at, updated_at";

/// Provides CRUD operations for catalog exercises.
pub struct ExerciseRepo;

impl ExerciseRepo {
    pub async fn create(pool: &PgPool, input: &CreateExercise) -> Result<Exercise, sqlx::Error> {
        let query = format!(
            "INSERT INTO exercises (name, description, img_url, category_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Exercise>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.img_url)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Exercise>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM exercises WHERE id = $1");
        sqlx::query_as::<_, Exercise>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM exercises WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// List exercises, optionally restricted to one category. Ordered by name.
    pub async fn list(
        pool: &PgPool,
        category_id: Option<DbId>,
    ) -> Result<Vec<Exercise>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM exercises \
             WHERE ($1::bigint IS NULL OR category_id = $1) \
             ORDER BY name"
        );
        sqlx::query_as::<_, Exercise>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateExercise,
    ) -> Result<Option<Exercise>, sqlx::Error> {
        let query = format!(
            "UPDATE exercises SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                img_url = COALESCE($4, img_url), \
                category_id = COALESCE($5, category_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Exercise>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.img_url)
            .bind(input.category_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an exercise. Routine and assigned rows using it cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

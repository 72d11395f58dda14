//! Repository for the `routine_exercises` table.
//!
//! Positions are written only through [`RoutineExerciseRepo::create`] and
//! [`RoutineExerciseRepo::save_orders`], both driven by the ordering manager.

use coach_core::ordering::OrderChange;
use coach_core::types::{DbId, Position};
use sqlx::PgPool;

use crate::models::routine_exercise::{
    RoutineExercise, RoutineExercisePayload, UpdateRoutineExercise,
};

const COLUMNS: &str = "id, routine_id, exercise_id, \"order\", reps, series, weight_kg, \
                       rest_time_s, created_at, updated_at";

pub struct RoutineExerciseRepo;

impl RoutineExerciseRepo {
    /// Insert a row at `order`. Siblings must already have been shifted.
    pub async fn create(
        pool: &PgPool,
        routine_id: DbId,
        order: Position,
        input: &RoutineExercisePayload,
    ) -> Result<RoutineExercise, sqlx::Error> {
        let query = format!(
            "INSERT INTO routine_exercises \
                (routine_id, exercise_id, \"order\", reps, series, weight_kg, rest_time_s) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoutineExercise>(&query)
            .bind(routine_id)
            .bind(input.exercise_id)
            .bind(order)
            .bind(input.reps)
            .bind(input.series)
            .bind(input.weight_kg)
            .bind(input.rest_time_s)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RoutineExercise>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM routine_exercises WHERE id = $1");
        sqlx::query_as::<_, RoutineExercise>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All exercises of a routine sorted by `(order, id)`.
    pub async fn list_by_routine(
        pool: &PgPool,
        routine_id: DbId,
    ) -> Result<Vec<RoutineExercise>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM routine_exercises \
             WHERE routine_id = $1 \
             ORDER BY \"order\", id"
        );
        sqlx::query_as::<_, RoutineExercise>(&query)
            .bind(routine_id)
            .fetch_all(pool)
            .await
    }

    /// Routines that contain `exercise_id`, for renormalizing after the
    /// exercise is removed from the catalog.
    pub async fn routine_ids_using(
        pool: &PgPool,
        exercise_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT routine_id FROM routine_exercises \
             WHERE exercise_id = $1 \
             ORDER BY routine_id",
        )
        .bind(exercise_id)
        .fetch_all(pool)
        .await
    }

    /// Apply a payload patch. Only non-`None` fields are written.
    pub async fn update_payload(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoutineExercise,
    ) -> Result<Option<RoutineExercise>, sqlx::Error> {
        let query = format!(
            "UPDATE routine_exercises SET \
                exercise_id = COALESCE($2, exercise_id), \
                reps = COALESCE($3, reps), \
                series = COALESCE($4, series), \
                weight_kg = COALESCE($5, weight_kg), \
                rest_time_s = COALESCE($6, rest_time_s) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoutineExercise>(&query)
            .bind(id)
            .bind(input.exercise_id)
            .bind(input.reps)
            .bind(input.series)
            .bind(input.weight_kg)
            .bind(input.rest_time_s)
            .fetch_optional(pool)
            .await
    }

    /// Rewrite the `order` of every listed row in one statement.
    ///
    /// Rows are locked in id order first, so concurrent rewrites of the same
    /// list queue behind each other instead of deadlocking.
    pub async fn save_orders(pool: &PgPool, changes: &[OrderChange]) -> Result<u64, sqlx::Error> {
        let (ids, orders): (Vec<DbId>, Vec<Position>) =
            changes.iter().map(|c| (c.id, c.order)).unzip();

        let mut tx = pool.begin().await?;
        sqlx::query("SELECT id FROM routine_exercises WHERE id = ANY($1) ORDER BY id FOR UPDATE")
            .bind(&ids)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query(
            "UPDATE routine_exercises AS re SET \"order\" = c.new_order \
             FROM UNNEST($1::bigint[], $2::int[]) AS c(id, new_order) \
             WHERE re.id = c.id",
        )
        .bind(&ids)
        .bind(&orders)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::debug!(rows = result.rows_affected(), "Saved routine_exercises orders");
        Ok(result.rows_affected())
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM routine_exercises WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

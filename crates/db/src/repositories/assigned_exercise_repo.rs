//! Repository for the `assigned_exercises` table.

use coach_core::ordering::OrderChange;
use coach_core::types::{DbId, Position};
use sqlx::PgPool;

use crate::models::assigned_exercise::{
    AssignedExercise, AssignedExercisePayload, UpdateAssignedExercise,
};

const COLUMNS: &str = "id, assigned_routine_id, exercise_id, \"order\", reps, series, \
                       weight_kg, rest_time_s, completed, created_at, updated_at";

pub struct AssignedExerciseRepo;

impl AssignedExerciseRepo {
    /// Insert a row at `order`. Siblings must already have been shifted.
    pub async fn create(
        pool: &PgPool,
        assigned_routine_id: DbId,
        order: Position,
        input: &AssignedExercisePayload,
    ) -> Result<AssignedExercise, sqlx::Error> {
        let query = format!(
            "INSERT INTO assigned_exercises \
                (assigned_routine_id, exercise_id, \"order\", \
                 reps, series, weight_kg, rest_time_s) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssignedExercise>(&query)
            .bind(assigned_routine_id)
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
    ) -> Result<Option<AssignedExercise>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assigned_exercises WHERE id = $1");
        sqlx::query_as::<_, AssignedExercise>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All exercises of an assigned routine sorted by `(order, id)`.
    pub async fn list_by_assigned_routine(
        pool: &PgPool,
        assigned_routine_id: DbId,
    ) -> Result<Vec<AssignedExercise>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assigned_exercises \
             WHERE assigned_routine_id = $1 \
             ORDER BY \"order\", id"
        );
        sqlx::query_as::<_, AssignedExercise>(&query)
            .bind(assigned_routine_id)
            .fetch_all(pool)
            .await
    }

    /// Assigned routines that contain `exercise_id`.
    pub async fn assigned_routine_ids_using(
        pool: &PgPool,
        exercise_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT assigned_routine_id FROM assigned_exercises \
             WHERE exercise_id = $1 \
             ORDER BY assigned_routine_id",
        )
        .bind(exercise_id)
        .fetch_all(pool)
        .await
    }

    /// Apply a payload/completion patch. Only non-`None` fields are written.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAssignedExercise,
    ) -> Result<Option<AssignedExercise>, sqlx::Error> {
        let query = format!(
            "UPDATE assigned_exercises SET \
                reps = COALESCE($2, reps), \
                series = COALESCE($3, series), \
                weight_kg = COALESCE($4, weight_kg), \
                rest_time_s = COALESCE($5, rest_time_s), \
                completed = COALESCE($6, completed) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssignedExercise>(&query)
            .bind(id)
            .bind(input.reps)
            .bind(input.series)
            .bind(input.weight_kg)
            .bind(input.rest_time_s)
            .bind(input.completed)
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
        sqlx::query("SELECT id FROM assigned_exercises WHERE id = ANY($1) ORDER BY id FOR UPDATE")
            .bind(&ids)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query(
            "UPDATE assigned_exercises AS ae SET \"order\" = c.new_order \
             FROM UNNEST($1::bigint[], $2::int[]) AS c(id, new_order) \
             WHERE ae.id = c.id",
        )
        .bind(&ids)
        .bind(&orders)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::debug!(rows = result.rows_affected(), "Saved assigned_exercises orders");
        Ok(result.rows_affected())
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assigned_exercises WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for `weight_history`, `routine_history` and `exercise_history`.

use coach_core::types::DbId;
use sqlx::PgPool;

use crate::models::history::{CreateWeightHistory, ExerciseHistory, RoutineHistory, WeightHistory};

const WEIGHT_COLUMNS: &str = "id, athlete_id, recorded_on, weight_kg, created_at, updated_at";

const ROUTINE_COLUMNS: &str =
    "id, athlete_id, assigned_routine_id, name, description, created_at, updated_at";

const EXERCISE_COLUMNS: &str = "id, athlete_id, exercise_id, routine_history_id, \"order\", \
                                reps, series, weight_kg, rest_time_s, created_at, updated_at";

pub struct HistoryRepo;

impl HistoryRepo {
    // -- Weight -------------------------------------------------------------

    pub async fn create_weight(
        pool: &PgPool,
        input: &CreateWeightHistory,
    ) -> Result<WeightHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO weight_history (athlete_id, recorded_on, weight_kg) \
             VALUES ($1, $2, $3) \
             RETURNING {WEIGHT_COLUMNS}"
        );
        sqlx::query_as::<_, WeightHistory>(&query)
            .bind(input.athlete_id)
            .bind(input.recorded_on)
            .bind(input.weight_kg)
            .fetch_one(pool)
            .await
    }

    /// Weight entries of an athlete, oldest first.
    pub async fn list_weight(
        pool: &PgPool,
        athlete_id: DbId,
    ) -> Result<Vec<WeightHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {WEIGHT_COLUMNS} FROM weight_history \
             WHERE athlete_id = $1 \
             ORDER BY recorded_on, id"
        );
        sqlx::query_as::<_, WeightHistory>(&query)
            .bind(athlete_id)
            .fetch_all(pool)
            .await
    }

    // -- Routine completion -------------------------------------------------

    /// Mark an assigned routine completed, then snapshot it and its exercises.
    ///
    /// Runs in one transaction. The conditional `UPDATE` claims the row first,
    /// so of several concurrent calls exactly one proceeds to write history;
    /// the others wait on the row lock, see `completed = true` and get `None`.
    /// Also `None` if the assigned routine does not exist.
    pub async fn record_completion(
        pool: &PgPool,
        assigned_routine_id: DbId,
    ) -> Result<Option<RoutineHistory>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let claimed = sqlx::query_scalar::<_, DbId>(
            "UPDATE assigned_routines SET completed = true \
             WHERE id = $1 AND NOT completed \
             RETURNING id",
        )
        .bind(assigned_routine_id)
        .fetch_optional(&mut *tx)
        .await?;
        if claimed.is_none() {
            tx.rollback().await?;
            tracing::debug!(
                assigned_routine_id,
                "Completion skipped, routine missing or already completed",
            );
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO routine_history (athlete_id, assigned_routine_id, name, description) \
             SELECT ar.athlete_id, ar.id, r.name, COALESCE(ar.description, r.description) \
             FROM assigned_routines ar \
             JOIN routines r ON r.id = ar.routine_id \
             WHERE ar.id = $1 \
             RETURNING {ROUTINE_COLUMNS}"
        );
        let history = sqlx::query_as::<_, RoutineHistory>(&query)
            .bind(assigned_routine_id)
            .fetch_one(&mut *tx)
            .await?;

        let copied = sqlx::query(
            "INSERT INTO exercise_history \
                (athlete_id, exercise_id, routine_history_id, \"order\", \
                 reps, series, weight_kg, rest_time_s) \
             SELECT $1, exercise_id, $2, \"order\", reps, series, weight_kg, rest_time_s \
             FROM assigned_exercises \
             WHERE assigned_routine_id = $3",
        )
        .bind(history.athlete_id)
        .bind(history.id)
        .bind(assigned_routine_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        tracing::debug!(
            assigned_routine_id,
            routine_history_id = history.id,
            exercises = copied,
            "Completion recorded",
        );
        Ok(Some(history))
    }

    /// Completed routines of an athlete, newest first.
    pub async fn list_routines(
        pool: &PgPool,
        athlete_id: DbId,
    ) -> Result<Vec<RoutineHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {ROUTINE_COLUMNS} FROM routine_history \
             WHERE athlete_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, RoutineHistory>(&query)
            .bind(athlete_id)
            .fetch_all(pool)
            .await
    }

    /// Exercise snapshots of an athlete, grouped by completed routine
    /// (newest first) and in routine order within each group.
    pub async fn list_exercises(
        pool: &PgPool,
        athlete_id: DbId,
    ) -> Result<Vec<ExerciseHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercise_history \
             WHERE athlete_id = $1 \
             ORDER BY routine_history_id DESC, \"order\", id"
        );
        sqlx::query_as::<_, ExerciseHistory>(&query)
            .bind(athlete_id)
            .fetch_all(pool)
            .await
    }
}

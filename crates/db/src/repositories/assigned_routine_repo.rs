//! Repository for the `assigned_routines` table.

use coach_core::types::DbId;
use sqlx::PgPool;

use crate::models::assigned_routine::{AssignedRoutine, CreateAssignedRoutine};

const COLUMNS: &str = "id, routine_id, athlete_id, description, assignment_date, completed, \
                       created_at, updated_at";

pub struct AssignedRoutineRepo;

impl AssignedRoutineRepo {
    /// Assign a routine to an athlete and copy its exercises.
    ///
    /// The copies are numbered `1..N` by the source `(order, id)`, so the new
    /// list is dense even if the source had drifted. Runs in one transaction.
    pub async fn assign(
        pool: &PgPool,
        input: &CreateAssignedRoutine,
    ) -> Result<(AssignedRoutine, u64), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO assigned_routines (routine_id, athlete_id, description, assignment_date) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let assigned = sqlx::query_as::<_, AssignedRoutine>(&query)
            .bind(input.routine_id)
            .bind(input.athlete_id)
            .bind(&input.description)
            .bind(input.assignment_date)
            .fetch_one(&mut *tx)
            .await?;

        let copied = sqlx::query(
            "INSERT INTO assigned_exercises \
                (assigned_routine_id, exercise_id, \"order\", \
                 reps, series, weight_kg, rest_time_s) \
             SELECT $1, exercise_id, \
                    (ROW_NUMBER() OVER (ORDER BY \"order\", id))::int, \
                    reps, series, weight_kg, rest_time_s \
             FROM routine_exercises \
             WHERE routine_id = $2",
        )
        .bind(assigned.id)
        .bind(input.routine_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        Ok((assigned, copied))
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AssignedRoutine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assigned_routines WHERE id = $1");
        sqlx::query_as::<_, AssignedRoutine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM assigned_routines WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// An athlete's assignments, newest first.
    pub async fn list_by_athlete(
        pool: &PgPool,
        athlete_id: DbId,
    ) -> Result<Vec<AssignedRoutine>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assigned_routines \
             WHERE athlete_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, AssignedRoutine>(&query)
            .bind(athlete_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assigned_routines WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

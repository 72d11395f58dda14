//! The ordering manager driven against the Postgres stores.

mod common;

use assert_matches::assert_matches;
use coach_core::error::CoreError;
use coach_core::ordering::{OrderChange, OrderedListManager};
use coach_db::models::assigned_routine::CreateAssignedRoutine;
use coach_db::models::routine_exercise::RoutineExercisePayload;
use coach_db::repositories::{AssignedExerciseRepo, AssignedRoutineRepo, RoutineExerciseRepo};
use coach_db::stores::{AssignedExerciseStore, RoutineExerciseStore};
use coach_db::StoreError;
use sqlx::PgPool;

fn payload(exercise_id: i64) -> RoutineExercisePayload {
    RoutineExercisePayload {
        exercise_id,
        reps: Some(10),
        series: Some(3),
        weight_kg: None,
        rest_time_s: Some(60),
    }
}

/// `(exercise_id, order)` pairs in list order.
async fn layout(pool: &PgPool, routine_id: i64) -> Vec<(i64, i32)> {
    RoutineExerciseRepo::list_by_routine(pool, routine_id)
        .await
        .unwrap()
        .into_iter()
        .map(|re| (re.exercise_id, re.order))
        .collect()
}

/// A routine with exercises e1..e{n} appended in that order.
async fn routine_with(pool: &PgPool, n: usize) -> (i64, Vec<i64>) {
    let trainer = common::trainer(pool, "coach@example.com").await;
    let routine = common::routine(pool, trainer.id, "Push day").await;
    let store = RoutineExerciseStore::new(pool.clone());
    let manager = OrderedListManager::new(&store);

    let mut exercise_ids = Vec::new();
    for i in 1..=n {
        let ex = common::exercise(pool, &format!("Exercise {i}")).await;
        manager.insert(routine.id, payload(ex.id), None).await.unwrap();
        exercise_ids.push(ex.id);
    }
    (routine.id, exercise_ids)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_append_numbers_from_one(pool: PgPool) {
    let (routine_id, ex) = routine_with(&pool, 3).await;
    assert_eq!(
        layout(&pool, routine_id).await,
        vec![(ex[0], 1), (ex[1], 2), (ex[2], 3)]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_at_position_shifts_tail(pool: PgPool) {
    let (routine_id, ex) = routine_with(&pool, 3).await;
    let extra = common::exercise(&pool, "Extra").await;

    let store = RoutineExerciseStore::new(pool.clone());
    let created = OrderedListManager::new(&store)
        .insert(routine_id, payload(extra.id), Some(2))
        .await
        .unwrap();

    assert_eq!(created.order, 2);
    assert_eq!(
        layout(&pool, routine_id).await,
        vec![(ex[0], 1), (extra.id, 2), (ex[1], 3), (ex[2], 4)]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_into_missing_routine_is_not_found(pool: PgPool) {
    let extra = common::exercise(&pool, "Orphan").await;
    let store = RoutineExerciseStore::new(pool.clone());

    let err = OrderedListManager::new(&store)
        .insert(9999, payload(extra.id), None)
        .await
        .unwrap_err();

    assert_matches!(
        err,
        StoreError::Core(CoreError::NotFound { entity: "Routine", id: 9999 })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_third_to_first(pool: PgPool) {
    let (routine_id, ex) = routine_with(&pool, 4).await;
    let rows = RoutineExerciseRepo::list_by_routine(&pool, routine_id).await.unwrap();

    let store = RoutineExerciseStore::new(pool.clone());
    let moved = OrderedListManager::new(&store)
        .reorder(rows[2].id, 1)
        .await
        .unwrap();

    assert_eq!(moved.order, 1);
    assert_eq!(
        layout(&pool, routine_id).await,
        vec![(ex[2], 1), (ex[0], 2), (ex[1], 3), (ex[3], 4)]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_closes_gap(pool: PgPool) {
    let (routine_id, ex) = routine_with(&pool, 3).await;
    let rows = RoutineExerciseRepo::list_by_routine(&pool, routine_id).await.unwrap();

    let store = RoutineExerciseStore::new(pool.clone());
    let removed = OrderedListManager::new(&store).delete(rows[1].id).await.unwrap();

    assert_eq!(removed.exercise_id, ex[1]);
    assert_eq!(layout(&pool, routine_id).await, vec![(ex[0], 1), (ex[2], 2)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_normalize_repairs_drifted_rows(pool: PgPool) {
    let (routine_id, ex) = routine_with(&pool, 3).await;
    let rows = RoutineExerciseRepo::list_by_routine(&pool, routine_id).await.unwrap();

    // Simulate an interrupted operation: a gap and a duplicate.
    RoutineExerciseRepo::save_orders(
        &pool,
        &[
            OrderChange { id: rows[0].id, order: 4 },
            OrderChange { id: rows[1].id, order: 4 },
            OrderChange { id: rows[2].id, order: 9 },
        ],
    )
    .await
    .unwrap();

    let store = RoutineExerciseStore::new(pool.clone());
    let manager = OrderedListManager::new(&store);
    assert_eq!(manager.normalize(routine_id).await.unwrap(), 3);
    assert_eq!(manager.normalize(routine_id).await.unwrap(), 0);

    assert_eq!(
        layout(&pool, routine_id).await,
        vec![(ex[0], 1), (ex[1], 2), (ex[2], 3)]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assignment_copies_dense_order(pool: PgPool) {
    let (routine_id, ex) = routine_with(&pool, 3).await;
    let trainer_id = sqlx::query_scalar::<_, i64>("SELECT trainer_id FROM routines WHERE id = $1")
        .bind(routine_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    let athlete = common::athlete(&pool, trainer_id, "leo@example.com", "+5491100000001").await;

    let (assigned, copied) = AssignedRoutineRepo::assign(
        &pool,
        &CreateAssignedRoutine {
            routine_id,
            athlete_id: athlete.id,
            description: None,
            assignment_date: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(copied, 3);

    let copies = AssignedExerciseRepo::list_by_assigned_routine(&pool, assigned.id)
        .await
        .unwrap();
    let got: Vec<(i64, i32, bool)> = copies
        .iter()
        .map(|c| (c.exercise_id, c.order, c.completed))
        .collect();
    assert_eq!(got, vec![(ex[0], 1, false), (ex[1], 2, false), (ex[2], 3, false)]);

    // The assigned list is ordered independently of the template.
    let store = AssignedExerciseStore::new(pool.clone());
    OrderedListManager::new(&store)
        .reorder(copies[0].id, 99)
        .await
        .unwrap();
    assert_eq!(
        layout(&pool, routine_id).await,
        vec![(ex[0], 1), (ex[1], 2), (ex[2], 3)]
    );
    let reordered: Vec<(i64, i32)> =
        AssignedExerciseRepo::list_by_assigned_routine(&pool, assigned.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| (c.exercise_id, c.order))
            .collect();
    assert_eq!(reordered, vec![(ex[1], 1), (ex[2], 2), (ex[0], 3)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_inserts_settle_dense(pool: PgPool) {
    let (routine_id, _) = routine_with(&pool, 4).await;

    let mut extra = Vec::new();
    for i in 0..12 {
        extra.push(common::exercise(&pool, &format!("Burst {i}")).await.id);
    }

    // Front inserts shift every sibling while appends renormalize the tail.
    let mut tasks = Vec::new();
    for (i, exercise_id) in extra.into_iter().enumerate() {
        let pool = pool.clone();
        let desired = if i % 2 == 0 { Some(1) } else { None };
        tasks.push(tokio::spawn(async move {
            let store = RoutineExerciseStore::new(pool);
            OrderedListManager::new(&store)
                .insert(routine_id, payload(exercise_id), desired)
                .await
        }));
    }
    for task in tasks {
        let result = task.await.unwrap();
        assert!(result.is_ok(), "concurrent insert failed: {result:?}");
    }

    let store = RoutineExerciseStore::new(pool.clone());
    OrderedListManager::new(&store)
        .normalize(routine_id)
        .await
        .unwrap();
    let orders: Vec<i32> = layout(&pool, routine_id)
        .await
        .into_iter()
        .map(|(_, order)| order)
        .collect();
    assert_eq!(orders, (1..=16).collect::<Vec<i32>>());
}

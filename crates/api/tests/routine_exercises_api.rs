mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{json, Value};
use sqlx::PgPool;

/// `(exercise_id, order)` pairs of a routine, as listed by the API.
async fn listing(pool: &PgPool, routine_id: i64, token: &str) -> Vec<(i64, i64)> {
    let app = build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/routines/{routine_id}/exercises"), token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| {
            (
                item["exercise_id"].as_i64().unwrap(),
                item["order"].as_i64().unwrap(),
            )
        })
        .collect()
}

async fn insert(pool: &PgPool, routine_id: i64, token: &str, body: Value) -> Value {
    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/routines/{routine_id}/exercises"),
        body,
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inserts_reorders_and_deletes_stay_dense(pool: PgPool) {
    let trainer = trainer(&pool, "ana@gym.test").await;
    let token = trainer_token(&trainer);
    let routine = routine(&pool, trainer.id, "Push day").await;
    let squat = exercise(&pool, "Squat").await;
    let bench = exercise(&pool, "Bench press").await;
    let row = exercise(&pool, "Row").await;
    let plank = exercise(&pool, "Plank").await;

    let body = json!({ "exercise_id": squat.id, "reps": 5 });
    let first = insert(&pool, routine.id, &token, body).await;
    assert_eq!(first["order"], 1);
    insert(&pool, routine.id, &token, json!({ "exercise_id": bench.id })).await;
    let at_two = insert(
        &pool,
        routine.id,
        &token,
        json!({ "exercise_id": row.id, "desired_order": 2 }),
    )
    .await;
    assert_eq!(at_two["order"], 2);

    assert_eq!(
        listing(&pool, routine.id, &token).await,
        vec![(squat.id, 1), (row.id, 2), (bench.id, 3)]
    );

    // Out-of-range positions clamp to the end.
    let clamped = insert(
        &pool,
        routine.id,
        &token,
        json!({ "exercise_id": plank.id, "desired_order": 99 }),
    )
    .await;
    assert_eq!(clamped["order"], 4);

    // Move the squat to the third slot.
    let app = build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/routine-exercises/{}", first["id"]),
        json!({ "desired_order": "3" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let moved = body_json(response).await;
    assert_eq!(moved["data"]["order"], 3);

    assert_eq!(
        listing(&pool, routine.id, &token).await,
        vec![(row.id, 1), (bench.id, 2), (squat.id, 3), (plank.id, 4)]
    );

    // Remove the row; everything after it closes the gap.
    let app = build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/routine-exercises/{}", at_two["id"]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(
        listing(&pool, routine.id, &token).await,
        vec![(bench.id, 1), (squat.id, 2), (plank.id, 3)]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn payload_patch_keeps_position(pool: PgPool) {
    let trainer = trainer(&pool, "ana@gym.test").await;
    let token = trainer_token(&trainer);
    let routine = routine(&pool, trainer.id, "Legs").await;
    let squat = exercise(&pool, "Squat").await;
    let lunge = exercise(&pool, "Lunge").await;

    insert(&pool, routine.id, &token, json!({ "exercise_id": squat.id })).await;
    let second = insert(&pool, routine.id, &token, json!({ "exercise_id": lunge.id })).await;

    let app = build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/routine-exercises/{}", second["id"]),
        json!({ "reps": 12, "series": 3, "weight_kg": 20.5 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["order"], 2);
    assert_eq!(json["data"]["reps"], 12);
    assert_eq!(json["data"]["weight_kg"], 20.5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_desired_order_is_rejected(pool: PgPool) {
    let trainer = trainer(&pool, "ana@gym.test").await;
    let token = trainer_token(&trainer);
    let routine = routine(&pool, trainer.id, "Legs").await;
    let squat = exercise(&pool, "Squat").await;
    let item = insert(&pool, routine.id, &token, json!({ "exercise_id": squat.id })).await;

    let app = build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/routine-exercises/{}", item["id"]),
        json!({ "desired_order": "second" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let app = build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/routine-exercises/{}", item["id"]),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_exercise_is_not_found(pool: PgPool) {
    let trainer = trainer(&pool, "ana@gym.test").await;
    let token = trainer_token(&trainer);
    let routine = routine(&pool, trainer.id, "Legs").await;
    let app = build_test_app(pool);

    let response = post_json_auth(
        app,
        &format!("/api/v1/routines/{}/exercises", routine.id),
        json!({ "exercise_id": 424242 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_trainer_cannot_touch_the_routine(pool: PgPool) {
    let owner = trainer(&pool, "ana@gym.test").await;
    let intruder = trainer(&pool, "max@gym.test").await;
    let routine = routine(&pool, owner.id, "Legs").await;
    let squat = exercise(&pool, "Squat").await;
    let item = insert(
        &pool,
        routine.id,
        &trainer_token(&owner),
        json!({ "exercise_id": squat.id }),
    )
    .await;
    let token = trainer_token(&intruder);

    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/routines/{}/exercises", routine.id),
        json!({ "exercise_id": squat.id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = build_test_app(pool.clone());
    let uri = format!("/api/v1/routine-exercises/{}", item["id"]);
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_an_exercise_renumbers_routines(pool: PgPool) {
    let admin = admin(&pool, "root@gym.test").await;
    let trainer = trainer(&pool, "ana@gym.test").await;
    let token = trainer_token(&trainer);
    let routine = routine(&pool, trainer.id, "Legs").await;
    let squat = exercise(&pool, "Squat").await;
    let lunge = exercise(&pool, "Lunge").await;
    let calf = exercise(&pool, "Calf raise").await;

    for id in [squat.id, lunge.id, calf.id] {
        insert(&pool, routine.id, &token, json!({ "exercise_id": id })).await;
    }

    let app = build_test_app(pool.clone());
    let uri = format!("/api/v1/exercises/{}", lunge.id);
    let response = delete_auth(app, &uri, &admin_token(&admin)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(
        listing(&pool, routine.id, &token).await,
        vec![(squat.id, 1), (calf.id, 2)]
    );
}

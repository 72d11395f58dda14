mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{json, Value};
use sqlx::PgPool;

struct Fixture {
    trainer_token: String,
    athlete_token: String,
    athlete_id: i64,
    assigned_routine_id: i64,
    assigned_exercise_ids: Vec<i64>,
    otp_code: String,
}

/// A trainer with one athlete and a two-exercise routine assigned to them.
async fn assigned_fixture(pool: &PgPool) -> Fixture {
    let trainer = trainer(pool, "ana@gym.test").await;
    let athlete = athlete(pool, trainer.id, "leo@gym.test", "600111222").await;
    let trainer_token = trainer_token(&trainer);
    let routine = routine(pool, trainer.id, "Pull day").await;

    for (name, reps) in [("Pull-up", 8), ("Row", 10)] {
        let exercise = exercise(pool, name).await;
        let app = build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            &format!("/api/v1/routines/{}/exercises", routine.id),
            json!({ "exercise_id": exercise.id, "reps": reps, "series": 4 }),
            &trainer_token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/assigned-routines",
        json!({
            "routine_id": routine.id,
            "athlete_id": athlete.id,
            "assignment_date": "17/10/2026",
        }),
        &trainer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["exercises_copied"], 2);
    assert_eq!(data["assigned_routine"]["athlete_id"], athlete.id);
    assert_eq!(data["assigned_routine"]["description"], "Full body");
    assert_eq!(data["assigned_routine"]["assignment_date"], "2026-10-17");
    assert_eq!(data["assigned_routine"]["completed"], false);
    assert_eq!(data["otp"]["athlete_id"], athlete.id);

    let otp_code = data["otp"]["code"].as_str().unwrap().to_string();
    assert_eq!(otp_code.len(), 6);
    assert!(otp_code[..3].chars().all(|c| c.is_ascii_uppercase()));
    assert!(otp_code[3..].chars().all(|c| c.is_ascii_digit()));

    let assigned_routine_id = data["assigned_routine"]["id"].as_i64().unwrap();
    let app = build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/assigned-routines/{assigned_routine_id}/exercises"),
        &trainer_token,
    )
    .await;
    let listing = body_json(response).await;
    let orders: Vec<i64> = listing["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![1, 2]);

    Fixture {
        trainer_token,
        athlete_token: athlete_token(&athlete),
        athlete_id: athlete.id,
        assigned_routine_id,
        assigned_exercise_ids: ids(&listing),
        otp_code,
    }
}

async fn patch_exercise(pool: &PgPool, id: i64, body: Value, token: &str) -> StatusCode {
    let app = build_test_app(pool.clone());
    patch_json_auth(app, &format!("/api/v1/assigned-exercises/{id}"), body, token)
        .await
        .status()
}

async fn complete(pool: &PgPool, id: i64, token: &str) -> axum::response::Response {
    let app = build_test_app(pool.clone());
    post_auth(app, &format!("/api/v1/assigned-routines/{id}/complete"), token).await
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn assignment_code_logs_the_athlete_in(pool: PgPool) {
    let fixture = assigned_fixture(&pool).await;

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/athlete",
        json!({ "otp_code": fixture.otp_code }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], fixture.athlete_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_trainer_cannot_assign_to_foreign_athlete(pool: PgPool) {
    let fixture = assigned_fixture(&pool).await;
    let intruder = trainer(&pool, "max@gym.test").await;
    let own_routine = routine(&pool, intruder.id, "Mine").await;

    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/assigned-routines",
        json!({ "routine_id": own_routine.id, "athlete_id": fixture.athlete_id }),
        &trainer_token(&intruder),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn athlete_sees_own_assignments(pool: PgPool) {
    let fixture = assigned_fixture(&pool).await;

    let app = build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/athletes/{}/assigned-routines", fixture.athlete_id),
        &fixture.athlete_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(ids(&json), vec![fixture.assigned_routine_id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_code_issue_keeps_the_assignment(pool: PgPool) {
    let coach = trainer(&pool, "ana@gym.test").await;
    let athlete = athlete(&pool, coach.id, "leo@gym.test", "600111222").await;
    let routine = routine(&pool, coach.id, "Pull day").await;
    let token = trainer_token(&coach);

    let mut config = test_config();
    config.otp.max_attempts = 0;
    let app = build_test_app_with(pool.clone(), config);
    let response = post_json_auth(
        app,
        "/api/v1/assigned-routines",
        json!({ "routine_id": routine.id, "athlete_id": athlete.id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "RETRY_EXHAUSTED");

    let app = build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/athletes/{}/assigned-routines", athlete.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await).len(), 1);

    let app = build_test_app(pool);
    let response = post_auth(app, &format!("/api/v1/athletes/{}/otp", athlete.id), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["athlete_id"], athlete.id);
}

// ---------------------------------------------------------------------------
// Assigned exercise patch rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn athlete_may_complete_but_not_reorder(pool: PgPool) {
    let fixture = assigned_fixture(&pool).await;
    let first = fixture.assigned_exercise_ids[0];

    let status = patch_exercise(
        &pool,
        first,
        json!({ "completed": true, "weight_kg": 42.5 }),
        &fixture.athlete_token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let status =
        patch_exercise(&pool, first, json!({ "desired_order": 2 }), &fixture.athlete_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn trainer_may_reorder_but_not_complete(pool: PgPool) {
    let fixture = assigned_fixture(&pool).await;
    let (first, second) = (
        fixture.assigned_exercise_ids[0],
        fixture.assigned_exercise_ids[1],
    );

    let status =
        patch_exercise(&pool, first, json!({ "completed": true }), &fixture.trainer_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let status =
        patch_exercise(&pool, second, json!({ "desired_order": 1 }), &fixture.trainer_token).await;
    assert_eq!(status, StatusCode::OK);

    let app = build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/assigned-routines/{}/exercises", fixture.assigned_routine_id),
        &fixture.trainer_token,
    )
    .await;
    assert_eq!(ids(&body_json(response).await), vec![second, first]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_athlete_cannot_patch(pool: PgPool) {
    let fixture = assigned_fixture(&pool).await;
    let owner = trainer(&pool, "max@gym.test").await;
    let stranger = athlete(&pool, owner.id, "eva@gym.test", "600333444").await;

    let status = patch_exercise(
        &pool,
        fixture.assigned_exercise_ids[0],
        json!({ "completed": true }),
        &athlete_token(&stranger),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn completion_writes_history_once(pool: PgPool) {
    let fixture = assigned_fixture(&pool).await;

    let response = complete(&pool, fixture.assigned_routine_id, &fixture.athlete_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Pull day");
    assert_eq!(json["data"]["athlete_id"], fixture.athlete_id);

    let response = complete(&pool, fixture.assigned_routine_id, &fixture.athlete_token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let app = build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/athletes/{}/exercise-history", fixture.athlete_id),
        &fixture.athlete_token,
    )
    .await;
    let history = body_json(response).await;
    let reps: Vec<i64> = history["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["reps"].as_i64().unwrap())
        .collect();
    assert_eq!(reps.len(), 2);
    assert!(reps.contains(&8) && reps.contains(&10));

    let app = build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/assigned-routines/{}", fixture.assigned_routine_id),
        &fixture.trainer_token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["completed"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_the_assignee_may_complete(pool: PgPool) {
    let fixture = assigned_fixture(&pool).await;
    let other = trainer(&pool, "max@gym.test").await;
    let stranger = athlete(&pool, other.id, "eva@gym.test", "600333444").await;

    let response = complete(&pool, fixture.assigned_routine_id, &athlete_token(&stranger)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = complete(&pool, fixture.assigned_routine_id, &fixture.trainer_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completion_requires_a_live_code(pool: PgPool) {
    let fixture = assigned_fixture(&pool).await;

    sqlx::query("UPDATE otp_codes SET active = false WHERE athlete_id = $1")
        .bind(fixture.athlete_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = complete(&pool, fixture.assigned_routine_id, &fixture.athlete_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "A valid OTP is required to complete a routine");
}

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;
use sqlx::PgPool;

fn new_athlete_body(email: &str, phone: &str) -> serde_json::Value {
    json!({
        "name": "Lucía Gómez",
        "email": email,
        "phone": phone,
        "date_birth": "03/02/1995",
        "goals": "Gain strength",
        "weight": 61.5,
        "height": 165.0,
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn trainer_creates_athlete_with_first_code(pool: PgPool) {
    let trainer = trainer(&pool, "ana@gym.test").await;
    let app = build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/athletes",
        new_athlete_body("Lucia@Gym.test", "+34600111222"),
        &trainer_token(&trainer),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let athlete = &json["data"]["athlete"];
    assert_eq!(athlete["email"], "lucia@gym.test");
    assert_eq!(athlete["trainer_id"], trainer.id);
    assert_eq!(athlete["date_birth"], "1995-02-03");
    assert_eq!(json["data"]["otp"]["athlete_id"], athlete["id"]);
    assert_eq!(json["data"]["otp"]["active"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_conflicts(pool: PgPool) {
    let trainer = trainer(&pool, "ana@gym.test").await;
    athlete(&pool, trainer.id, "lucia@gym.test", "600999888").await;
    let app = build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/athletes",
        new_athlete_body("lucia@gym.test", "600111222"),
        &trainer_token(&trainer),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_birth_date_is_rejected(pool: PgPool) {
    let trainer = trainer(&pool, "ana@gym.test").await;
    let mut body = new_athlete_body("lucia@gym.test", "600111222");
    body["date_birth"] = json!("1995-02-03");
    let app = build_test_app(pool);

    let response = post_json_auth(app, "/api/v1/athletes", body, &trainer_token(&trainer)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn trainers_list_only_their_athletes(pool: PgPool) {
    let ana = trainer(&pool, "ana@gym.test").await;
    let max = trainer(&pool, "max@gym.test").await;
    let mine = athlete(&pool, ana.id, "leo@gym.test", "600111222").await;
    athlete(&pool, max.id, "eva@gym.test", "600333444").await;

    let app = build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/athletes", &trainer_token(&ana)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await), vec![mine.id]);

    let app = build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/athletes/{}", mine.id),
        &trainer_token(&max),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn athlete_records_own_weight_only(pool: PgPool) {
    let trainer = trainer(&pool, "ana@gym.test").await;
    let athlete = athlete(&pool, trainer.id, "leo@gym.test", "600111222").await;
    let uri = format!("/api/v1/athletes/{}/weight-history", athlete.id);

    let app = build_test_app(pool.clone());
    let body = json!({ "weight_kg": 71.2 });
    let response = post_json_auth(app, &uri, body, &athlete_token(&athlete)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = build_test_app(pool.clone());
    let body = json!({ "weight_kg": 70.0 });
    let response = post_json_auth(app, &uri, body, &trainer_token(&trainer)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = build_test_app(pool);
    let response = get_auth(app, &uri, &trainer_token(&trainer)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["weight_kg"], 71.2);
}

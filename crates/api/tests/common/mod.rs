#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use coach_api::auth::jwt::{generate_token, JwtConfig};
use coach_api::auth::password::hash_password;
use coach_api::config::{OtpConfig, ServerConfig};
use coach_api::router::build_app_router;
use coach_api::state::AppState;
use coach_core::roles::{ROLE_ADMIN, ROLE_ATHLETE, ROLE_TRAINER};
use coach_core::types::DbId;
use coach_db::models::admin::{Admin, CreateAdmin};
use coach_db::models::athlete::{Athlete, CreateAthlete};
use coach_db::models::exercise::{CreateExercise, Exercise};
use coach_db::models::routine::{CreateRoutine, Routine};
use coach_db::models::trainer::{CreateTrainer, Trainer};
use coach_db::repositories::{AdminRepo, AthleteRepo, ExerciseRepo, RoutineRepo, TrainerRepo};

pub const TEST_PASSWORD: &str = "Lift-4-life!";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        cookie_secure: false,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 24,
        },
        otp: OtpConfig::default(),
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Same as [`build_test_app`] with a caller-supplied config.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

pub fn token_for(user_id: DbId, role: &str, name: &str) -> String {
    generate_token(user_id, role, name, &test_config().jwt).expect("token generation")
}

pub fn admin_token(admin: &Admin) -> String {
    token_for(admin.id, ROLE_ADMIN, &admin.email)
}

pub fn trainer_token(trainer: &Trainer) -> String {
    token_for(trainer.id, ROLE_TRAINER, &trainer.name)
}

pub fn athlete_token(athlete: &Athlete) -> String {
    token_for(athlete.id, ROLE_ATHLETE, &athlete.name)
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

pub async fn admin(pool: &PgPool, email: &str) -> Admin {
    AdminRepo::create(
        pool,
        &CreateAdmin {
            email: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
        },
    )
    .await
    .unwrap()
}

pub async fn trainer(pool: &PgPool, email: &str) -> Trainer {
    TrainerRepo::create(
        pool,
        &CreateTrainer {
            name: "Ana Ruiz".to_string(),
            email: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            phone: None,
            date_birth: None,
        },
    )
    .await
    .unwrap()
}

pub async fn athlete(pool: &PgPool, trainer_id: DbId, email: &str, phone: &str) -> Athlete {
    AthleteRepo::create(
        pool,
        &CreateAthlete {
            name: "Leo Paz".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            date_birth: NaiveDate::from_ymd_opt(1998, 4, 12).unwrap(),
            goals: "Run a marathon".to_string(),
            weight: Some(70.0),
            height: Some(176.0),
            gender: None,
            injuries: None,
            trainer_id: Some(trainer_id),
        },
    )
    .await
    .unwrap()
}

pub async fn exercise(pool: &PgPool, name: &str) -> Exercise {
    ExerciseRepo::create(
        pool,
        &CreateExercise {
            name: name.to_string(),
            description: None,
            img_url: None,
            category_id: None,
        },
    )
    .await
    .unwrap()
}

pub async fn routine(pool: &PgPool, trainer_id: DbId, name: &str) -> Routine {
    RoutineRepo::create(
        pool,
        &CreateRoutine {
            name: name.to_string(),
            description: Some("Full body".to_string()),
            trainer_id,
        },
    )
    .await
    .unwrap()
}

/// `ids` of the items in a `{ "data": [...] }` list, in response order.
pub fn ids(json: &Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

//! Fixture builders shared by the db integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use coach_db::models::athlete::{Athlete, CreateAthlete};
use coach_db::models::exercise::{CreateExercise, Exercise};
use coach_db::models::routine::{CreateRoutine, Routine};
use coach_db::models::trainer::{CreateTrainer, Trainer};
use coach_db::repositories::{AthleteRepo, ExerciseRepo, RoutineRepo, TrainerRepo};
use sqlx::PgPool;

pub async fn trainer(pool: &PgPool, email: &str) -> Trainer {
    TrainerRepo::create(
        pool,
        &CreateTrainer {
            name: "Ana Trainer".to_string(),
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            phone: None,
            date_birth: None,
        },
    )
    .await
    .expect("trainer creation should succeed")
}

pub async fn athlete(pool: &PgPool, trainer_id: i64, email: &str, phone: &str) -> Athlete {
    AthleteRepo::create(
        pool,
        &CreateAthlete {
            name: "Leo Athlete".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            date_birth: NaiveDate::from_ymd_opt(1995, 4, 12).unwrap(),
            goals: "Run a marathon".to_string(),
            weight: Some(70.0),
            height: Some(1.78),
            gender: None,
            injuries: None,
            trainer_id: Some(trainer_id),
        },
    )
    .await
    .expect("athlete creation should succeed")
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
    .expect("exercise creation should succeed")
}

pub async fn routine(pool: &PgPool, trainer_id: i64, name: &str) -> Routine {
    RoutineRepo::create(
        pool,
        &CreateRoutine {
            name: name.to_string(),
            description: Some("Full body".to_string()),
            trainer_id,
        },
    )
    .await
    .expect("routine creation should succeed")
}

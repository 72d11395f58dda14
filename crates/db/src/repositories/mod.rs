//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_repo;
pub mod assigned_exercise_repo;
pub mod assigned_routine_repo;
pub mod athlete_repo;
pub mod category_repo;
pub mod exercise_repo;
pub mod history_repo;
pub mod otp_repo;
pub mod routine_exercise_repo;
pub mod routine_repo;
pub mod trainer_repo;

pub use admin_repo::AdminRepo;
pub use assigned_exercise_repo::AssignedExerciseRepo;
pub use assigned_routine_repo::AssignedRoutineRepo;
pub use athlete_repo::AthleteRepo;
pub use category_repo::CategoryRepo;
pub use exercise_repo::ExerciseRepo;
pub use history_repo::HistoryRepo;
pub use otp_repo::OtpRepo;
pub use routine_exercise_repo::RoutineExerciseRepo;
pub use routine_repo::RoutineRepo;
pub use trainer_repo::TrainerRepo;

use async_trait::async_trait;
use coach_core::ordering::{OrderChange, OrderedStore};
use coach_core::types::{DbId, Position};
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::routine_exercise::{RoutineExercise, RoutineExercisePayload};
use crate::repositories::{RoutineExerciseRepo, RoutineRepo};

/// Ordered list of exercises within a routine.
pub struct RoutineExerciseStore {
    pool: PgPool,
}

impl RoutineExerciseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderedStore for RoutineExerciseStore {
    type Item = RoutineExercise;
    type Payload = RoutineExercisePayload;
    type Error = StoreError;

    const ENTITY: &'static str = "RoutineExercise";
    const PARENT_ENTITY: &'static str = "Routine";

    async fn parent_exists(&self, parent_id: DbId) -> Result<bool, StoreError> {
        Ok(RoutineRepo::exists(&self.pool, parent_id).await?)
    }

    async fn find_by_parent(&self, parent_id: DbId) -> Result<Vec<RoutineExercise>, StoreError> {
        Ok(RoutineExerciseRepo::list_by_routine(&self.pool, parent_id).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<RoutineExercise>, StoreError> {
        Ok(RoutineExerciseRepo::find_by_id(&self.pool, id).await?)
    }

    async fn insert(
        &self,
        parent_id: DbId,
        order: Position,
        payload: RoutineExercisePayload,
    ) -> Result<RoutineExercise, StoreError> {
        Ok(RoutineExerciseRepo::create(&self.pool, parent_id, order, &payload).await?)
    }

    async fn save_orders(&self, changes: &[OrderChange]) -> Result<(), StoreError> {
        RoutineExerciseRepo::save_orders(&self.pool, changes).await?;
        Ok(())
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(RoutineExerciseRepo::delete(&self.pool, id).await?)
    }
}

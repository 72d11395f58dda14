use async_trait::async_trait;
use coach_core::ordering::{OrderChange, OrderedStore};
use coach_core::types::{DbId, Position};
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::assigned_exercise::{AssignedExercise, AssignedExercisePayload};
use crate::repositories::{AssignedExerciseRepo, AssignedRoutineRepo};

/// Ordered list of exercises within an assigned routine.
pub struct AssignedExerciseStore {
    pool: PgPool,
}

impl AssignedExerciseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderedStore for AssignedExerciseStore {
    type Item = AssignedExercise;
    type Payload = AssignedExercisePayload;
    type Error = StoreError;

    const ENTITY: &'static str = "AssignedExercise";
    const PARENT_ENTITY: &'static str = "AssignedRoutine";

    async fn parent_exists(&self, parent_id: DbId) -> Result<bool, StoreError> {
        Ok(AssignedRoutineRepo::exists(&self.pool, parent_id).await?)
    }

    async fn find_by_parent(&self, parent_id: DbId) -> Result<Vec<AssignedExercise>, StoreError> {
        Ok(AssignedExerciseRepo::list_by_assigned_routine(&self.pool, parent_id).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<AssignedExercise>, StoreError> {
        Ok(AssignedExerciseRepo::find_by_id(&self.pool, id).await?)
    }

    async fn insert(
        &self,
        parent_id: DbId,
        order: Position,
        payload: AssignedExercisePayload,
    ) -> Result<AssignedExercise, StoreError> {
        Ok(AssignedExerciseRepo::create(&self.pool, parent_id, order, &payload).await?)
    }

    async fn save_orders(&self, changes: &[OrderChange]) -> Result<(), StoreError> {
        AssignedExerciseRepo::save_orders(&self.pool, changes).await?;
        Ok(())
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(AssignedExerciseRepo::delete(&self.pool, id).await?)
    }
}

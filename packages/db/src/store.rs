//! SurrealDB-backed [`AssignmentStore`].

use queue_core::{AssignmentId, AssignmentStore, QueueAssignment, QueueId, StoreError};

use crate::DbError;
use crate::repositories::AssignmentRepository;

/// Assignment store over the global database connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurrealAssignmentStore;

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(what) => StoreError::NotFound(what),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

impl AssignmentStore for SurrealAssignmentStore {
    async fn load_assignments(&self, queue_id: QueueId) -> Result<Vec<QueueAssignment>, StoreError> {
        Ok(AssignmentRepository::list_for_queue(queue_id).await?)
    }

    async fn update_position(&self, id: AssignmentId, position: u32) -> Result<(), StoreError> {
        tracing::debug!(assignment = %id, position, "Writing assignment position");
        Ok(AssignmentRepository::update_position(id, position).await?)
    }
}

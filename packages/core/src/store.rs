//! Storage seam for the queue editor.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::{AssignmentId, QueueAssignment, QueueId};

/// Failure reported by an [`AssignmentStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Backend(String),
}

/// Durable home of queue assignments.
///
/// Writes are independent per row: there is no batch or transaction, and a
/// concurrent writer to the same row wins if it writes last.
pub trait AssignmentStore: Send + Sync + 'static {
    /// All assignments of a queue, ordered by position.
    fn load_assignments(
        &self,
        queue_id: QueueId,
    ) -> impl Future<Output = Result<Vec<QueueAssignment>, StoreError>> + Send;

    /// Persist a single assignment's position.
    fn update_position(
        &self,
        id: AssignmentId,
        position: u32,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

impl<T: AssignmentStore> AssignmentStore for Arc<T> {
    fn load_assignments(
        &self,
        queue_id: QueueId,
    ) -> impl Future<Output = Result<Vec<QueueAssignment>, StoreError>> + Send {
        self.as_ref().load_assignments(queue_id)
    }

    fn update_position(
        &self,
        id: AssignmentId,
        position: u32,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        self.as_ref().update_position(id, position)
    }
}

/// Process-local store for tests and offline demos.
///
/// Can be told to fail writes for one assignment, or every load, to
/// exercise recovery.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rows: Mutex<HashMap<AssignmentId, QueueAssignment>>,
    fail_writes_for: Mutex<Option<AssignmentId>>,
    fail_loads: Mutex<bool>,
    writes: Mutex<Vec<(AssignmentId, u32)>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assignments(assignments: impl IntoIterator<Item = QueueAssignment>) -> Self {
        let store = Self::new();
        for assignment in assignments {
            store.insert(assignment);
        }
        store
    }

    pub fn insert(&self, assignment: QueueAssignment) {
        if let Ok(mut rows) = self.rows.lock() {
            rows.insert(assignment.id, assignment);
        }
    }

    /// Make every write to `id` fail until cleared with `None`.
    pub fn fail_writes_for(&self, id: Option<AssignmentId>) {
        if let Ok(mut fail) = self.fail_writes_for.lock() {
            *fail = id;
        }
    }

    /// Make every load fail while `fail` is set.
    pub fn fail_loads(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_loads.lock() {
            *flag = fail;
        }
    }

    /// Successful writes in the order they happened.
    pub fn writes(&self) -> Vec<(AssignmentId, u32)> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    fn lock_error() -> StoreError {
        StoreError::Backend("store lock poisoned".into())
    }
}

impl AssignmentStore for InMemoryStore {
    async fn load_assignments(&self, queue_id: QueueId) -> Result<Vec<QueueAssignment>, StoreError> {
        if *self.fail_loads.lock().map_err(|_| Self::lock_error())? {
            return Err(StoreError::Backend("load rejected".into()));
        }

        let rows = self.rows.lock().map_err(|_| Self::lock_error())?;
        let mut list: Vec<QueueAssignment> = rows
            .values()
            .filter(|a| a.queue_id == queue_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.cmp(&b.id)));
        Ok(list)
    }

    async fn update_position(&self, id: AssignmentId, position: u32) -> Result<(), StoreError> {
        let failing = *self.fail_writes_for.lock().map_err(|_| Self::lock_error())?;
        if failing == Some(id) {
            return Err(StoreError::Backend(format!("write rejected for {}", id)));
        }

        let mut rows = self.rows.lock().map_err(|_| Self::lock_error())?;
        let row = rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("Assignment not found: {}", id)))?;
        row.position = position;
        drop(rows);

        if let Ok(mut writes) = self.writes.lock() {
            writes.push((id, position));
        }
        Ok(())
    }
}

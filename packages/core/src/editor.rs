//! Editing workflow for one queue: load, reorder, persist, re-detect.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conflicts::detect_conflicts;
use crate::reorder::{ReorderError, move_assignment, position_updates};
use crate::session::{Notice, Session};
use crate::store::{AssignmentStore, StoreError};
use crate::{AssignmentId, Conflict, Queue, QueueAssignment, QueueStatus};

/// Snapshot of a queue with its ordered assignments and current conflicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueBoard {
    pub queue: Queue,
    pub assignments: Vec<QueueAssignment>,
    pub conflicts: Vec<Conflict>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error(transparent)]
    Invalid(#[from] ReorderError),

    #[error("Queue is {0} and can no longer be reordered")]
    Locked(QueueStatus),

    /// A position write failed; the list was reloaded from storage.
    #[error("Failed to save position {position} for assignment {assignment_id}: {source}")]
    PositionWrite {
        assignment_id: AssignmentId,
        position: u32,
        source: StoreError,
    },

    /// A position write failed and so did the reload that followed it.
    #[error("Failed to save new order ({write}) and reload failed ({reload})")]
    Resync { write: StoreError, reload: StoreError },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// In-memory view of a queue's assignment order, backed by a store.
pub struct QueueEditor<S> {
    store: S,
    queue: Queue,
    assignments: Vec<QueueAssignment>,
    conflicts: Vec<Conflict>,
}

impl<S: AssignmentStore> QueueEditor<S> {
    /// Load a queue's assignments and run detection.
    pub async fn load(store: S, queue: Queue) -> Result<Self, StoreError> {
        let assignments = store.load_assignments(queue.id).await?;
        let conflicts = detect_conflicts(&assignments);
        Ok(Self {
            store,
            queue,
            assignments,
            conflicts,
        })
    }

    /// Replace the in-memory list with what storage holds now.
    pub async fn reload(&mut self) -> Result<(), StoreError> {
        self.assignments = self.store.load_assignments(self.queue.id).await?;
        self.conflicts = detect_conflicts(&self.assignments);
        Ok(())
    }

    /// Move the assignment at `from` to `to` and persist every position.
    ///
    /// Positions are written one row at a time in list order. The first
    /// failed write stops the run, is reported through the session and
    /// triggers a full reload, so the editor ends up showing durable state
    /// rather than the attempted order. Rows written before the failure
    /// keep their new positions.
    ///
    /// Returns `Ok(false)` when the request does not change the order.
    pub async fn reorder(
        &mut self,
        session: &Session,
        from: usize,
        to: Option<usize>,
    ) -> Result<bool, EditorError> {
        if !self.queue.status.is_editable() {
            return Err(EditorError::Locked(self.queue.status));
        }

        let mut next = self.assignments.clone();
        if !move_assignment(&mut next, from, to)? {
            return Ok(false);
        }
        self.assignments = next;

        for (assignment_id, position) in position_updates(&self.assignments) {
            if let Err(source) = self.store.update_position(assignment_id, position).await {
                session.notify(Notice::error(format!(
                    "Failed to save the new queue order: {}",
                    source
                )));
                return Err(match self.reload().await {
                    Ok(()) => EditorError::PositionWrite {
                        assignment_id,
                        position,
                        source,
                    },
                    Err(reload) => {
                        self.conflicts = detect_conflicts(&self.assignments);
                        EditorError::Resync {
                            write: source,
                            reload,
                        }
                    }
                });
            }
        }

        self.conflicts = detect_conflicts(&self.assignments);
        session.notify(Notice::success("Queue order updated"));
        Ok(true)
    }

    /// Replace the queue metadata, e.g. after a status change.
    pub fn set_queue(&mut self, queue: Queue) {
        self.queue = queue;
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn assignments(&self) -> &[QueueAssignment] {
        &self.assignments
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn board(&self) -> QueueBoard {
        QueueBoard {
            queue: self.queue.clone(),
            assignments: self.assignments.clone(),
            conflicts: self.conflicts.clone(),
        }
    }
}

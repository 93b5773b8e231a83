//! Event types for real-time updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Notice;
use crate::{AssignmentId, Queue, QueueId, QueueStatus};

/// Events emitted by the queue admin backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum QueueEvent {
    /// A new queue was created.
    QueueCreated {
        queue: Queue,
        timestamp: DateTime<Utc>,
    },
    /// A queue moved through its approval lifecycle.
    QueueStatusChanged {
        queue_id: QueueId,
        old_status: QueueStatus,
        new_status: QueueStatus,
        timestamp: DateTime<Utc>,
    },
    /// A queue and its assignments were deleted.
    QueueDeleted {
        queue_id: QueueId,
        timestamp: DateTime<Utc>,
    },
    /// Assignments were reordered and persisted.
    AssignmentsReordered {
        queue_id: QueueId,
        order: Vec<AssignmentId>,
        timestamp: DateTime<Utc>,
    },
    /// Detection ran and found conflicts.
    ConflictsDetected {
        queue_id: QueueId,
        count: usize,
        timestamp: DateTime<Utc>,
    },
    /// A user-facing notice.
    Notice {
        notice: Notice,
        timestamp: DateTime<Utc>,
    },
}

impl QueueEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            QueueEvent::QueueCreated { timestamp, .. }
            | QueueEvent::QueueStatusChanged { timestamp, .. }
            | QueueEvent::QueueDeleted { timestamp, .. }
            | QueueEvent::AssignmentsReordered { timestamp, .. }
            | QueueEvent::ConflictsDetected { timestamp, .. }
            | QueueEvent::Notice { timestamp, .. } => *timestamp,
        }
    }

    /// Get the queue ID associated with this event, if any.
    pub fn queue_id(&self) -> Option<QueueId> {
        match self {
            QueueEvent::QueueCreated { queue, .. } => Some(queue.id),
            QueueEvent::QueueStatusChanged { queue_id, .. }
            | QueueEvent::QueueDeleted { queue_id, .. }
            | QueueEvent::AssignmentsReordered { queue_id, .. }
            | QueueEvent::ConflictsDetected { queue_id, .. } => Some(*queue_id),
            QueueEvent::Notice { .. } => None,
        }
    }

    /// Short description of this event for logging.
    pub fn description(&self) -> String {
        match self {
            QueueEvent::QueueCreated { queue, .. } => format!("Queue for {} created", queue.date),
            QueueEvent::QueueStatusChanged {
                queue_id,
                new_status,
                ..
            } => format!("Queue {} -> {}", queue_id, new_status),
            QueueEvent::QueueDeleted { queue_id, .. } => format!("Queue {} deleted", queue_id),
            QueueEvent::AssignmentsReordered { queue_id, order, .. } => {
                format!("Queue {} reordered ({} assignments)", queue_id, order.len())
            }
            QueueEvent::ConflictsDetected {
                queue_id, count, ..
            } => format!("Queue {} has {} conflicts", queue_id, count),
            QueueEvent::Notice { notice, .. } => notice.message.clone(),
        }
    }
}

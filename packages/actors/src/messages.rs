//! Message types for actor communication.

use queue_core::{
    NewQueue, Queue, QueueBoard, QueueEvent, QueueId, QueueStatus, Session, SessionUser,
};
use ractor::RpcReplyPort;

/// Messages for a [`QueueEditorActor`](crate::QueueEditorActor).
#[derive(Debug)]
pub enum EditorMessage {
    /// Current snapshot of the board.
    GetBoard { reply: RpcReplyPort<QueueBoard> },

    /// Move the assignment at `from` to `to` and persist the new order.
    ///
    /// A `None` destination (dropped outside the list) is a no-op.
    Reorder {
        session: Session,
        from: usize,
        to: Option<usize>,
        reply: RpcReplyPort<Result<QueueBoard, String>>,
    },

    /// Drop in-memory state and reload from storage.
    Reload {
        reply: RpcReplyPort<Result<QueueBoard, String>>,
    },

    /// Queue metadata changed elsewhere, e.g. a status transition.
    SetQueue { queue: Queue },

    /// Stop the editor.
    Shutdown,
}

/// Messages for the Supervisor.
#[derive(Debug)]
pub enum SupervisorMessage {
    /// Validate and create a new draft queue.
    CreateQueue {
        input: NewQueue,
        reply: RpcReplyPort<Result<Queue, String>>,
    },

    /// Open (or reuse) the editor for a queue and return its board.
    OpenBoard {
        queue_id: QueueId,
        reply: RpcReplyPort<Result<QueueBoard, String>>,
    },

    /// Reorder one assignment within a queue.
    ReorderAssignment {
        queue_id: QueueId,
        from: usize,
        to: Option<usize>,
        user: Option<SessionUser>,
        reply: RpcReplyPort<Result<QueueBoard, String>>,
    },

    /// Force a queue's editor to reload from storage.
    ReloadBoard {
        queue_id: QueueId,
        reply: RpcReplyPort<Result<QueueBoard, String>>,
    },

    /// Move a queue through its approval lifecycle.
    TransitionQueue {
        queue_id: QueueId,
        status: QueueStatus,
        reply: RpcReplyPort<Result<Queue, String>>,
    },

    /// Delete a queue and its assignments.
    DeleteQueue {
        queue_id: QueueId,
        reply: RpcReplyPort<Result<(), String>>,
    },

    /// Subscribe to events.
    Subscribe {
        sender: tokio::sync::broadcast::Sender<QueueEvent>,
    },

    /// Broadcast an event to all subscribers.
    BroadcastEvent { event: QueueEvent },

    /// Stop all editors and the supervisor.
    Shutdown,
}

/// Error type for actor operations.
#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    #[error("Queue not found: {0}")]
    QueueNotFound(QueueId),

    #[error("Queue is {0} and cannot be deleted")]
    QueueLocked(QueueStatus),

    #[error("{0}")]
    Invalid(String),

    #[error("Actor error: {0}")]
    Actor(String),

    #[error("Database error: {0}")]
    Database(#[from] db::DbError),
}

//! Server API functions for the queue admin.
//!
//! This crate contains all shared fullstack server functions for:
//! - Queue management (create, list, approve, publish, delete)
//! - Queue boards (load, reorder, reload)
//! - Members, submissions and genres (read-only)

mod members;
mod queues;

#[cfg(feature = "server")]
mod init;

#[cfg(feature = "server")]
mod realtime;

#[cfg(feature = "server")]
mod seed;

// Re-export all server functions
pub use members::*;
pub use queues::*;

#[cfg(feature = "server")]
pub use init::{ensure_initialized, init_queue_admin};

#[cfg(feature = "server")]
pub(crate) use init::{ask_supervisor, parse_queue_id};

#[cfg(feature = "server")]
pub use realtime::subscribe_events;

// Re-export core types for convenience
pub use queue_core::{
    Conflict, ConflictKind, GenreFamily, Member, Queue, QueueAssignment, QueueBoard, QueueId,
    QueueStatus, Submission, SubmissionStatus,
};

//! Actor system for the queue admin.
//!
//! This crate provides the Ractor-based actors that serialize edits to
//! each queue and fan events out to subscribers.
//!
//! # Architecture
//!
//! - `Supervisor` - Top-level actor that creates, transitions and deletes
//!   queues and owns one editor per opened queue
//! - `QueueEditorActor` - Holds a queue's board and applies reorders one
//!   at a time
//!
//! # Usage
//!
//! ```ignore
//! use actors::{SupervisorMessage, start_supervisor};
//!
//! let (supervisor, handle) = start_supervisor().await?;
//!
//! let (tx, rx) = actors::concurrency::oneshot();
//! supervisor.send_message(SupervisorMessage::OpenBoard { queue_id, reply: tx.into() })?;
//! let board = rx.await??;
//! ```

mod editor_actor;
mod messages;
mod notifier;
pub mod registry;
mod supervisor;

pub use editor_actor::{EditorArgs, QueueEditorActor};
pub use messages::{ActorError, EditorMessage, SupervisorMessage};
pub use notifier::BroadcastNotifier;
pub use registry::{ActorRegistry, global_registry};
pub use supervisor::{Supervisor, start_supervisor};

/// Re-export ractor types for convenience.
pub use ractor::{Actor, ActorRef, RpcReplyPort, concurrency};

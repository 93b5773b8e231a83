//! Core domain types for the engagement queue admin.
//!
//! This crate contains shared types used across all packages:
//! - Members, submissions and the genre taxonomy
//! - Queues, their lifecycle and their assignments
//! - Conflict detection and reordering of assignments
//! - The queue editor workflow and its storage seam
//! - Events for real-time updates

mod assignment;
pub mod conflicts;
mod editor;
mod events;
mod ids;
mod member;
mod queue;
pub mod reorder;
pub mod session;
pub mod store;

pub use assignment::{AssignmentStatus, QueueAssignment, SubmissionRef, SupporterRef, UNKNOWN};
pub use conflicts::{Conflict, ConflictKind, detect_conflicts};
pub use editor::{EditorError, QueueBoard, QueueEditor};
pub use events::QueueEvent;
pub use ids::{AssignmentId, GenreId, MemberId, QueueId, SubmissionId};
pub use member::{
    GenreFamily, Member, MemberStatus, Submission, SubmissionStatus, Subgenre,
};
pub use queue::{MAX_SLOTS, NewQueue, Queue, QueueStatus, TransitionError, ValidationError};
pub use reorder::{ReorderError, move_assignment};
pub use session::{Notice, NoticeLevel, Notifier, Session, SessionUser};
pub use store::{AssignmentStore, StoreError};

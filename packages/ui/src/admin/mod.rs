//! Admin components for planning the daily engagement queues.

mod assignment_row;
mod conflict_panel;
mod create_queue_form;
pub mod pages;
mod status_badge;

pub use assignment_row::AssignmentRow;
pub use conflict_panel::ConflictPanel;
pub use create_queue_form::CreateQueueForm;
pub use pages::{AdminMembersPage, AdminQueueBoardPage, AdminQueuesPage};
pub use status_badge::{ConflictBadge, QueueStatusBadge};

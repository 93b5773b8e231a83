//! Admin page components for route-based navigation.

mod members_page;
mod queue_board_page;
mod queues_page;

pub use members_page::AdminMembersPage;
pub use queue_board_page::AdminQueueBoardPage;
pub use queues_page::AdminQueuesPage;

//! Queue management server functions.

use dioxus::prelude::*;
use queue_core::{Queue, QueueBoard};
#[cfg(feature = "server")]
use queue_core::QueueStatus;

/// List all queues, newest day first.
#[get("/api/queues")]
pub async fn list_queues() -> Result<Vec<Queue>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        crate::ensure_initialized()
            .await
            .map_err(|e| ServerFnError::new(format!("Initialization failed: {}", e)))?;

        db::repositories::QueueRepository::list()
            .await
            .map_err(|e| ServerFnError::new(format!("Failed to list queues: {}", e)))
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Get a queue by ID.
#[get("/api/queues/:id")]
pub async fn get_queue(id: String) -> Result<Option<Queue>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let queue_id = crate::parse_queue_id(&id)?;

        crate::ensure_initialized()
            .await
            .map_err(|e| ServerFnError::new(format!("Initialization failed: {}", e)))?;

        match db::repositories::QueueRepository::get(queue_id).await {
            Ok(queue) => Ok(Some(queue)),
            Err(db::DbError::NotFound(_)) => Ok(None),
            Err(e) => Err(ServerFnError::new(format!("Failed to load queue: {}", e))),
        }
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Create a draft queue for a day.
///
/// `date` is `YYYY-MM-DD`; at most one queue exists per day.
#[post("/api/queues/create")]
pub async fn create_queue(
    date: String,
    total_slots: u32,
    notes: Option<String>,
) -> Result<Queue, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use actors::SupervisorMessage;
        use queue_core::NewQueue;

        let input = NewQueue {
            date,
            total_slots,
            notes,
        };
        input
            .clone()
            .validate()
            .map_err(|e| ServerFnError::new(e.to_string()))?;

        crate::ask_supervisor(|reply| SupervisorMessage::CreateQueue { input, reply })
            .await?
            .map_err(ServerFnError::new)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Approve a draft queue.
#[post("/api/queues/:id/approve")]
pub async fn approve_queue(id: String) -> Result<Queue, ServerFnError> {
    #[cfg(feature = "server")]
    {
        transition(&id, QueueStatus::Approved).await
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Publish an approved queue. Published queues can no longer be edited.
#[post("/api/queues/:id/publish")]
pub async fn publish_queue(id: String) -> Result<Queue, ServerFnError> {
    #[cfg(feature = "server")]
    {
        transition(&id, QueueStatus::Published).await
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Send an approved queue back to draft.
#[post("/api/queues/:id/draft")]
pub async fn revert_queue_to_draft(id: String) -> Result<Queue, ServerFnError> {
    #[cfg(feature = "server")]
    {
        transition(&id, QueueStatus::Draft).await
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Delete a queue and its assignments.
#[post("/api/queues/:id/delete")]
pub async fn delete_queue(id: String) -> Result<(), ServerFnError> {
    #[cfg(feature = "server")]
    {
        use actors::SupervisorMessage;

        let queue_id = crate::parse_queue_id(&id)?;

        crate::ask_supervisor(|reply| SupervisorMessage::DeleteQueue { queue_id, reply })
            .await?
            .map_err(ServerFnError::new)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Queue with its ordered assignments and current conflicts.
#[get("/api/queues/:id/board")]
pub async fn get_queue_board(id: String) -> Result<QueueBoard, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use actors::SupervisorMessage;

        let queue_id = crate::parse_queue_id(&id)?;

        crate::ask_supervisor(|reply| SupervisorMessage::OpenBoard { queue_id, reply })
            .await?
            .map_err(ServerFnError::new)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Reload a board from storage, discarding the server's in-memory order.
#[post("/api/queues/:id/reload")]
pub async fn reload_queue_board(id: String) -> Result<QueueBoard, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use actors::SupervisorMessage;

        let queue_id = crate::parse_queue_id(&id)?;

        crate::ask_supervisor(|reply| SupervisorMessage::ReloadBoard { queue_id, reply })
            .await?
            .map_err(ServerFnError::new)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Move the assignment at list index `from` to index `to`.
///
/// Indices are 0-based positions in the board's list. `to: None` means
/// the row was dropped outside the list and nothing changes. Returns the
/// board after the move; on a failed save the error is returned and the
/// server has already reloaded its copy from storage.
#[post("/api/queues/:id/reorder")]
pub async fn reorder_assignment(
    id: String,
    from: usize,
    to: Option<usize>,
) -> Result<QueueBoard, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use actors::SupervisorMessage;

        let queue_id = crate::parse_queue_id(&id)?;

        crate::ask_supervisor(|reply| SupervisorMessage::ReorderAssignment {
            queue_id,
            from,
            to,
            user: None,
            reply,
        })
        .await?
        .map_err(ServerFnError::new)
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

#[cfg(feature = "server")]
async fn transition(id: &str, status: QueueStatus) -> Result<Queue, ServerFnError> {
    use actors::SupervisorMessage;

    let queue_id = crate::parse_queue_id(id)?;

    crate::ask_supervisor(|reply| SupervisorMessage::TransitionQueue {
        queue_id,
        status,
        reply,
    })
    .await?
    .map_err(ServerFnError::new)
}

//! Real-time event plumbing.

use actors::{SupervisorMessage, global_registry};
use queue_core::QueueEvent;
use tokio::sync::broadcast;

/// Subscribe to the supervisor's event stream.
///
/// Returns `None` when the supervisor is not running.
pub fn subscribe_events() -> Option<broadcast::Receiver<QueueEvent>> {
    let supervisor = global_registry().get_supervisor()?;
    let (tx, rx) = broadcast::channel(256);
    supervisor
        .send_message(SupervisorMessage::Subscribe { sender: tx })
        .ok()?;
    Some(rx)
}

/// Log every event at debug level for as long as the supervisor runs.
pub(crate) fn spawn_event_logger() {
    let Some(mut rx) = subscribe_events() else {
        tracing::warn!("Event logger not started: supervisor unavailable");
        return;
    };
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => tracing::debug!(queue = ?event.queue_id(), "{}", event.description()),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Event logger skipped {} events", skipped)
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subscription_without_a_supervisor() {
        assert!(global_registry().get_supervisor().is_none());
        assert!(subscribe_events().is_none());
    }
}

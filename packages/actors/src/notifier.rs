//! Notifier that publishes notices as events.

use chrono::Utc;
use queue_core::{Notice, Notifier, QueueEvent};
use tokio::sync::broadcast;

/// Sends every [`Notice`] onto the event bus as [`QueueEvent::Notice`].
///
/// Notices raised while nobody is subscribed are dropped.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<QueueEvent>,
}

impl BroadcastNotifier {
    pub fn new(tx: broadcast::Sender<QueueEvent>) -> Self {
        Self { tx }
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notice: Notice) {
        let _ = self.tx.send(QueueEvent::Notice {
            notice,
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queue_core::NoticeLevel;

    #[test]
    fn notices_become_events() {
        let (tx, mut rx) = broadcast::channel(4);
        BroadcastNotifier::new(tx).notify(Notice::error("boom"));

        match rx.try_recv() {
            Ok(QueueEvent::Notice { notice, .. }) => {
                assert_eq!(notice.level, NoticeLevel::Error);
                assert_eq!(notice.message, "boom");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}

//! Editor actor owning one queue's board.
//!
//! All edits to a queue pass through its actor's mailbox, so reorders on the
//! same queue run one after another within this process.

use std::marker::PhantomData;

use chrono::Utc;
use queue_core::{AssignmentStore, Queue, QueueEditor, QueueEvent};
use ractor::{Actor, ActorProcessingErr, ActorRef};
use tokio::sync::broadcast;

use crate::messages::EditorMessage;

/// Spawn arguments for a [`QueueEditorActor`].
pub struct EditorArgs<S> {
    pub store: S,
    pub queue: Queue,
    pub event_tx: Option<broadcast::Sender<QueueEvent>>,
}

impl<S> EditorArgs<S> {
    pub fn new(store: S, queue: Queue) -> Self {
        Self {
            store,
            queue,
            event_tx: None,
        }
    }

    /// Set the event broadcaster.
    pub fn with_event_tx(mut self, tx: broadcast::Sender<QueueEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }
}

/// State for the editor actor.
pub struct EditorActorState<S> {
    editor: QueueEditor<S>,
    event_tx: Option<broadcast::Sender<QueueEvent>>,
}

impl<S: AssignmentStore> EditorActorState<S> {
    fn broadcast(&self, event: QueueEvent) {
        if let Some(ref tx) = self.event_tx {
            let _ = tx.send(event);
        }
    }

    /// Publish the conflict count if detection found anything.
    fn broadcast_conflicts(&self) {
        let count = self.editor.conflicts().len();
        if count > 0 {
            self.broadcast(QueueEvent::ConflictsDetected {
                queue_id: self.editor.queue().id,
                count,
                timestamp: Utc::now(),
            });
        }
    }
}

/// Actor wrapping a [`QueueEditor`] over any assignment store.
pub struct QueueEditorActor<S>(PhantomData<fn() -> S>);

impl<S> QueueEditorActor<S> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<S> Default for QueueEditorActor<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AssignmentStore> Actor for QueueEditorActor<S> {
    type Msg = EditorMessage;
    type State = EditorActorState<S>;
    type Arguments = EditorArgs<S>;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!("Opening editor for queue {} ({})", args.queue.id, args.queue.date);

        let editor = QueueEditor::load(args.store, args.queue)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("Failed to load queue: {}", e)))?;

        let state = EditorActorState {
            editor,
            event_tx: args.event_tx,
        };
        state.broadcast_conflicts();
        Ok(state)
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            EditorMessage::GetBoard { reply } => {
                let _ = reply.send(state.editor.board());
            }

            EditorMessage::Reorder {
                session,
                from,
                to,
                reply,
            } => {
                let queue_id = state.editor.queue().id;
                match state.editor.reorder(&session, from, to).await {
                    Ok(true) => {
                        tracing::info!(
                            queue = %queue_id,
                            user = session.actor(),
                            "Moved assignment {} -> {:?}",
                            from,
                            to
                        );
                        state.broadcast(QueueEvent::AssignmentsReordered {
                            queue_id,
                            order: state.editor.assignments().iter().map(|a| a.id).collect(),
                            timestamp: Utc::now(),
                        });
                        state.broadcast_conflicts();
                        let _ = reply.send(Ok(state.editor.board()));
                    }
                    Ok(false) => {
                        let _ = reply.send(Ok(state.editor.board()));
                    }
                    Err(e) => {
                        tracing::warn!(queue = %queue_id, "Reorder failed: {}", e);
                        let _ = reply.send(Err(e.to_string()));
                    }
                }
            }

            EditorMessage::Reload { reply } => match state.editor.reload().await {
                Ok(()) => {
                    state.broadcast_conflicts();
                    let _ = reply.send(Ok(state.editor.board()));
                }
                Err(e) => {
                    tracing::warn!(queue = %state.editor.queue().id, "Reload failed: {}", e);
                    let _ = reply.send(Err(e.to_string()));
                }
            },

            EditorMessage::SetQueue { queue } => {
                state.editor.set_queue(queue);
            }

            EditorMessage::Shutdown => {
                tracing::info!("Closing editor for queue {}", state.editor.queue().id);
                myself.stop(None);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use queue_core::store::InMemoryStore;
    use queue_core::{
        ConflictKind, MemberId, QueueAssignment, QueueBoard, QueueStatus, Session, SubmissionId,
        SubmissionRef, SupporterRef,
    };

    use super::*;

    fn queue() -> Queue {
        Queue::new(NaiveDate::from_ymd_opt(2026, 7, 1).expect("valid date"), 10)
    }

    fn track(queue: &Queue, position: u32, genre: &str) -> QueueAssignment {
        QueueAssignment::new(queue.id, position).with_submission(SubmissionRef {
            id: SubmissionId::new(),
            artist_name: format!("Artist {position}"),
            track_name: format!("Track {position}"),
            family: Some(genre.to_string()),
        })
    }

    fn supported_by(queue: &Queue, position: u32, genre: &str, supporter: MemberId) -> QueueAssignment {
        track(queue, position, genre).with_supporter(SupporterRef {
            id: supporter,
            name: "Eve".to_string(),
        })
    }

    async fn board(actor: &ActorRef<EditorMessage>) -> QueueBoard {
        let (tx, rx) = ractor::concurrency::oneshot();
        actor
            .send_message(EditorMessage::GetBoard { reply: tx.into() })
            .expect("editor alive");
        rx.await.expect("board reply")
    }

    async fn reorder(
        actor: &ActorRef<EditorMessage>,
        from: usize,
        to: Option<usize>,
    ) -> Result<QueueBoard, String> {
        let (tx, rx) = ractor::concurrency::oneshot();
        actor
            .send_message(EditorMessage::Reorder {
                session: Session::anonymous(),
                from,
                to,
                reply: tx.into(),
            })
            .expect("editor alive");
        rx.await.expect("reorder reply")
    }

    #[tokio::test]
    async fn reorder_broadcasts_new_order() {
        let queue = queue();
        let eve = MemberId::new();
        let rows = vec![
            supported_by(&queue, 1, "House", eve),
            track(&queue, 2, "Dub"),
            supported_by(&queue, 3, "Techno", eve),
        ];
        let order = [rows[0].id, rows[1].id, rows[2].id];
        let store = Arc::new(InMemoryStore::with_assignments(rows));
        let (event_tx, mut events) = broadcast::channel(16);

        let (actor, handle) = Actor::spawn(
            None,
            QueueEditorActor::new(),
            EditorArgs::new(store.clone(), queue.clone()).with_event_tx(event_tx),
        )
        .await
        .expect("spawn editor");

        // Duplicate supporter is detected on open.
        assert!(matches!(
            events.recv().await,
            Ok(QueueEvent::ConflictsDetected { count: 1, .. })
        ));
        assert_eq!(board(&actor).await.conflicts[0].kind(), ConflictKind::DuplicateSupporter);

        let updated = reorder(&actor, 2, Some(0)).await.expect("reorder succeeds");
        let ids: Vec<_> = updated.assignments.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![order[2], order[0], order[1]]);

        match events.recv().await {
            Ok(QueueEvent::AssignmentsReordered { order: sent, .. }) => assert_eq!(sent, ids),
            other => panic!("unexpected event: {:?}", other),
        }

        actor.send_message(EditorMessage::Shutdown).expect("editor alive");
        handle.await.expect("editor stops");
    }

    #[tokio::test]
    async fn failed_write_replies_error_and_board_matches_storage() {
        let queue = queue();
        let rows = vec![
            QueueAssignment::new(queue.id, 1),
            QueueAssignment::new(queue.id, 2),
        ];
        let second = rows[1].id;
        let store = Arc::new(InMemoryStore::with_assignments(rows));
        store.fail_writes_for(Some(second));

        let (actor, _handle) = Actor::spawn(
            None,
            QueueEditorActor::new(),
            EditorArgs::new(store.clone(), queue.clone()),
        )
        .await
        .expect("spawn editor");

        let err = reorder(&actor, 1, Some(0)).await.unwrap_err();
        assert!(err.contains("Failed to save position"));

        let durable = store.load_assignments(queue.id).await.expect("load");
        assert_eq!(board(&actor).await.assignments, durable);
    }

    #[tokio::test]
    async fn published_queue_rejects_reorder() {
        let mut queue = queue();
        let store = Arc::new(InMemoryStore::with_assignments(vec![
            QueueAssignment::new(queue.id, 1),
            QueueAssignment::new(queue.id, 2),
        ]));

        let (actor, _handle) = Actor::spawn(
            None,
            QueueEditorActor::new(),
            EditorArgs::new(store.clone(), queue.clone()),
        )
        .await
        .expect("spawn editor");

        queue.status = QueueStatus::Published;
        actor
            .send_message(EditorMessage::SetQueue { queue })
            .expect("editor alive");

        assert!(reorder(&actor, 1, Some(0)).await.is_err());
        assert!(store.writes().is_empty());
    }
}

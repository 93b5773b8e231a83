//! Supervisor actor owning the queue editors and the event bus.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use db::SurrealAssignmentStore;
use db::repositories::QueueRepository;
use queue_core::{
    NewQueue, Queue, QueueBoard, QueueEvent, QueueId, QueueStatus, Session, SessionUser,
};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort, SupervisionEvent};
use tokio::sync::broadcast;

use crate::editor_actor::{EditorArgs, QueueEditorActor};
use crate::messages::{ActorError, EditorMessage, SupervisorMessage};
use crate::notifier::BroadcastNotifier;

/// State for the supervisor actor.
pub struct SupervisorState {
    /// Open editors by queue.
    pub editors: HashMap<QueueId, ActorRef<EditorMessage>>,
    /// Event broadcaster.
    pub event_tx: broadcast::Sender<QueueEvent>,
}

impl SupervisorState {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(1024);
        Self {
            editors: HashMap::new(),
            event_tx,
        }
    }

    fn broadcast(&self, event: QueueEvent) {
        tracing::debug!("Event: {}", event.description());
        let _ = self.event_tx.send(event);
    }

    /// Editor for `queue_id`, spawning one if the queue has none yet.
    async fn open_editor(
        &mut self,
        myself: &ActorRef<SupervisorMessage>,
        queue_id: QueueId,
    ) -> Result<ActorRef<EditorMessage>, ActorError> {
        if let Some(editor) = self.editors.get(&queue_id) {
            return Ok(editor.clone());
        }

        let queue = fetch_queue(queue_id).await?;

        let args =
            EditorArgs::new(SurrealAssignmentStore, queue).with_event_tx(self.event_tx.clone());
        let (editor, _handle) = Actor::spawn_linked(
            Some(format!("editor-{}", queue_id)),
            QueueEditorActor::new(),
            args,
            myself.get_cell(),
        )
        .await
        .map_err(|e| ActorError::Actor(format!("Failed to open queue: {}", e)))?;

        self.editors.insert(queue_id, editor.clone());
        Ok(editor)
    }

    async fn create_queue(&mut self, input: NewQueue) -> Result<Queue, ActorError> {
        let queue = input
            .validate()
            .map_err(|e| ActorError::Invalid(e.to_string()))?;

        if QueueRepository::get_by_date(queue.date).await.is_ok() {
            return Err(ActorError::Invalid(format!(
                "A queue already exists for {}",
                queue.date
            )));
        }

        let queue = QueueRepository::create(&queue).await?;
        tracing::info!("Created queue {} for {}", queue.id, queue.date);

        self.broadcast(QueueEvent::QueueCreated {
            queue: queue.clone(),
            timestamp: Utc::now(),
        });
        Ok(queue)
    }

    async fn transition_queue(
        &mut self,
        queue_id: QueueId,
        status: QueueStatus,
    ) -> Result<Queue, ActorError> {
        let mut queue = fetch_queue(queue_id).await?;
        let old_status = queue.status;
        queue
            .transition(status)
            .map_err(|e| ActorError::Invalid(e.to_string()))?;

        let queue = QueueRepository::update_status(queue_id, queue.status).await?;
        tracing::info!("Queue {} moved {} -> {}", queue_id, old_status, queue.status);

        if let Some(editor) = self.editors.get(&queue_id) {
            let _ = editor.send_message(EditorMessage::SetQueue {
                queue: queue.clone(),
            });
        }

        self.broadcast(QueueEvent::QueueStatusChanged {
            queue_id,
            old_status,
            new_status: queue.status,
            timestamp: Utc::now(),
        });
        Ok(queue)
    }

    async fn delete_queue(&mut self, queue_id: QueueId) -> Result<(), ActorError> {
        let queue = fetch_queue(queue_id).await?;
        if !queue.status.is_editable() {
            return Err(ActorError::QueueLocked(queue.status));
        }

        if let Some(editor) = self.editors.remove(&queue_id) {
            let _ = editor.send_message(EditorMessage::Shutdown);
        }

        QueueRepository::delete(queue_id).await?;
        tracing::info!("Deleted queue {} for {}", queue_id, queue.date);

        self.broadcast(QueueEvent::QueueDeleted {
            queue_id,
            timestamp: Utc::now(),
        });
        Ok(())
    }
}

impl Default for SupervisorState {
    fn default() -> Self {
        Self::new()
    }
}

async fn fetch_queue(queue_id: QueueId) -> Result<Queue, ActorError> {
    QueueRepository::get(queue_id).await.map_err(|e| match e {
        db::DbError::NotFound(_) => ActorError::QueueNotFound(queue_id),
        other => ActorError::Database(other),
    })
}

/// Send a request to an editor and wait for its reply.
async fn ask_editor<T: Send + 'static>(
    editor: &ActorRef<EditorMessage>,
    build: impl FnOnce(RpcReplyPort<T>) -> EditorMessage,
) -> Result<T, ActorError> {
    let (tx, rx) = ractor::concurrency::oneshot();
    editor
        .send_message(build(tx.into()))
        .map_err(|_| ActorError::Actor("Queue editor is not running".into()))?;
    rx.await
        .map_err(|_| ActorError::Actor("Queue editor did not reply".into()))
}

fn flatten(result: Result<Result<QueueBoard, String>, ActorError>) -> Result<QueueBoard, String> {
    result.map_err(|e| e.to_string()).and_then(|inner| inner)
}

/// Supervisor actor that manages all open queues.
pub struct Supervisor;

impl Actor for Supervisor {
    type Msg = SupervisorMessage;
    type State = SupervisorState;
    type Arguments = ();

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        _args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!("Starting queue supervisor");
        Ok(SupervisorState::new())
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            SupervisorMessage::CreateQueue { input, reply } => {
                let result = state.create_queue(input).await;
                let _ = reply.send(result.map_err(|e| e.to_string()));
            }

            SupervisorMessage::OpenBoard { queue_id, reply } => {
                let result = match state.open_editor(&myself, queue_id).await {
                    Ok(editor) => {
                        ask_editor(&editor, |reply| EditorMessage::GetBoard { reply }).await
                    }
                    Err(e) => Err(e),
                };
                let _ = reply.send(result.map_err(|e| e.to_string()));
            }

            SupervisorMessage::ReorderAssignment {
                queue_id,
                from,
                to,
                user,
                reply,
            } => {
                let session = session_for(user, &state.event_tx);
                let result = match state.open_editor(&myself, queue_id).await {
                    Ok(editor) => {
                        ask_editor(&editor, |reply| EditorMessage::Reorder {
                            session,
                            from,
                            to,
                            reply,
                        })
                        .await
                    }
                    Err(e) => Err(e),
                };
                let _ = reply.send(flatten(result));
            }

            SupervisorMessage::ReloadBoard { queue_id, reply } => {
                let result = match state.open_editor(&myself, queue_id).await {
                    Ok(editor) => ask_editor(&editor, |reply| EditorMessage::Reload { reply }).await,
                    Err(e) => Err(e),
                };
                let _ = reply.send(flatten(result));
            }

            SupervisorMessage::TransitionQueue {
                queue_id,
                status,
                reply,
            } => {
                let result = state.transition_queue(queue_id, status).await;
                let _ = reply.send(result.map_err(|e| e.to_string()));
            }

            SupervisorMessage::DeleteQueue { queue_id, reply } => {
                let result = state.delete_queue(queue_id).await;
                let _ = reply.send(result.map_err(|e| e.to_string()));
            }

            SupervisorMessage::Subscribe { sender } => {
                let mut rx = state.event_tx.subscribe();
                tokio::spawn(async move {
                    while let Ok(event) = rx.recv().await {
                        if sender.send(event).is_err() {
                            break;
                        }
                    }
                });
            }

            SupervisorMessage::BroadcastEvent { event } => {
                state.broadcast(event);
            }

            SupervisorMessage::Shutdown => {
                tracing::info!("Shutting down supervisor");
                for editor in state.editors.values() {
                    let _ = editor.send_message(EditorMessage::Shutdown);
                }
                myself.stop(None);
            }
        }

        Ok(())
    }

    async fn handle_supervisor_evt(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: SupervisionEvent,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            SupervisionEvent::ActorTerminated(cell, _, reason) => {
                tracing::info!(
                    "Editor {} stopped: {:?}",
                    cell.get_name().unwrap_or_default(),
                    reason
                );
                state.editors.retain(|_, editor| editor.get_id() != cell.get_id());
            }
            SupervisionEvent::ActorFailed(cell, err) => {
                tracing::warn!(
                    "Editor {} failed: {}",
                    cell.get_name().unwrap_or_default(),
                    err
                );
                state.editors.retain(|_, editor| editor.get_id() != cell.get_id());
            }
            _ => {}
        }
        Ok(())
    }
}

/// Session whose notices go out on the event bus.
fn session_for(user: Option<SessionUser>, tx: &broadcast::Sender<QueueEvent>) -> Session {
    Session::new(user, Arc::new(BroadcastNotifier::new(tx.clone())))
}

/// Start the supervisor.
pub async fn start_supervisor()
-> Result<(ActorRef<SupervisorMessage>, tokio::task::JoinHandle<()>), ractor::SpawnErr> {
    Actor::spawn(Some("supervisor".to_string()), Supervisor, ()).await
}

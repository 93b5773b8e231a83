#![allow(clippy::disallowed_methods)]

use std::error::Error;

use actors::{Actor, ActorRef, RpcReplyPort, Supervisor, SupervisorMessage};
use db::DbConfig;
use db::repositories::{AssignmentRepository, MemberRepository, NewAssignment};
use queue_core::{ConflictKind, Member, NewQueue, QueueEvent, QueueId, QueueStatus};
use tokio::sync::broadcast;

async fn ask<T: Send + 'static>(
    supervisor: &ActorRef<SupervisorMessage>,
    build: impl FnOnce(RpcReplyPort<T>) -> SupervisorMessage,
) -> Result<T, Box<dyn Error>> {
    let (tx, rx) = actors::concurrency::oneshot();
    supervisor.send_message(build(tx.into()))?;
    Ok(rx.await?)
}

fn new_queue(date: &str, slots: u32) -> NewQueue {
    NewQueue {
        date: date.to_string(),
        total_slots: slots,
        notes: None,
    }
}

#[tokio::test]
async fn test_supervisor_queue_lifecycle() -> Result<(), Box<dyn Error>> {
    db::init(DbConfig::memory()).await?;

    let (supervisor, handle) = Actor::spawn(None, Supervisor, ()).await?;
    let (events_tx, mut events) = broadcast::channel(64);
    supervisor.send_message(SupervisorMessage::Subscribe { sender: events_tx })?;

    // Create: validation and one queue per day
    let invalid = ask(&supervisor, |reply| SupervisorMessage::CreateQueue {
        input: new_queue("2026-13-01", 5),
        reply,
    })
    .await?;
    assert!(invalid.unwrap_err().contains("Invalid date"));

    let queue = ask(&supervisor, |reply| SupervisorMessage::CreateQueue {
        input: new_queue("2026-08-01", 5),
        reply,
    })
    .await?
    .map_err(|e| format!("create failed: {e}"))?;
    assert_eq!(queue.status, QueueStatus::Draft);
    assert!(matches!(events.recv().await?, QueueEvent::QueueCreated { .. }));

    let duplicate = ask(&supervisor, |reply| SupervisorMessage::CreateQueue {
        input: new_queue("2026-08-01", 3),
        reply,
    })
    .await?;
    assert!(duplicate.is_err());

    // Board: three rows with no track, the same supporter twice
    let fay = MemberRepository::create(&Member::new("Fay", "fay@example.com")).await?;
    let mut ids = Vec::new();
    for position in 1..=3 {
        let mut row = NewAssignment::new(queue.id, position);
        if position != 2 {
            row = row.supporter(fay.id);
        }
        ids.push(AssignmentRepository::create(row).await?.id);
    }

    let board = ask(&supervisor, |reply| SupervisorMessage::OpenBoard {
        queue_id: queue.id,
        reply,
    })
    .await?
    .map_err(|e| format!("open failed: {e}"))?;
    assert_eq!(board.assignments.len(), 3);
    // Rows without a track share the unknown genre, so they also cluster.
    let kinds: Vec<_> = board.conflicts.iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![ConflictKind::DuplicateSupporter, ConflictKind::GenreClustering]
    );

    let missing = ask(&supervisor, |reply| SupervisorMessage::OpenBoard {
        queue_id: QueueId::new(),
        reply,
    })
    .await?;
    assert!(missing.unwrap_err().contains("Queue not found"));

    // Reorder persists and is visible after a reload
    let reordered = ask(&supervisor, |reply| SupervisorMessage::ReorderAssignment {
        queue_id: queue.id,
        from: 0,
        to: Some(2),
        user: None,
        reply,
    })
    .await?
    .map_err(|e| format!("reorder failed: {e}"))?;
    let order: Vec<_> = reordered.assignments.iter().map(|a| a.id).collect();
    assert_eq!(order, vec![ids[1], ids[2], ids[0]]);

    let reloaded = ask(&supervisor, |reply| SupervisorMessage::ReloadBoard {
        queue_id: queue.id,
        reply,
    })
    .await?
    .map_err(|e| format!("reload failed: {e}"))?;
    assert_eq!(reloaded.assignments, reordered.assignments);

    // Lifecycle: draft -> published is rejected, draft -> approved -> published works
    let skipped = ask(&supervisor, |reply| SupervisorMessage::TransitionQueue {
        queue_id: queue.id,
        status: QueueStatus::Published,
        reply,
    })
    .await?;
    assert!(skipped.is_err());

    for status in [QueueStatus::Approved, QueueStatus::Published] {
        let moved = ask(&supervisor, |reply| SupervisorMessage::TransitionQueue {
            queue_id: queue.id,
            status,
            reply,
        })
        .await?
        .map_err(|e| format!("transition failed: {e}"))?;
        assert_eq!(moved.status, status);
    }

    // Published queues are locked
    let locked = ask(&supervisor, |reply| SupervisorMessage::ReorderAssignment {
        queue_id: queue.id,
        from: 0,
        to: Some(1),
        user: None,
        reply,
    })
    .await?;
    assert!(locked.is_err());

    let undeletable = ask(&supervisor, |reply| SupervisorMessage::DeleteQueue {
        queue_id: queue.id,
        reply,
    })
    .await?;
    assert!(undeletable.is_err());

    // Deleting a draft queue removes it
    let scratch = ask(&supervisor, |reply| SupervisorMessage::CreateQueue {
        input: new_queue("2026-08-02", 2),
        reply,
    })
    .await?
    .map_err(|e| format!("create failed: {e}"))?;
    ask(&supervisor, |reply| SupervisorMessage::DeleteQueue {
        queue_id: scratch.id,
        reply,
    })
    .await?
    .map_err(|e| format!("delete failed: {e}"))?;
    assert!(!db::repositories::QueueRepository::exists(scratch.id).await?);

    let mut saw_reorder = false;
    let mut saw_delete = false;
    while let Ok(event) = events.try_recv() {
        match event {
            QueueEvent::AssignmentsReordered { queue_id, .. } => saw_reorder |= queue_id == queue.id,
            QueueEvent::QueueDeleted { queue_id, .. } => saw_delete |= queue_id == scratch.id,
            _ => {}
        }
    }
    assert!(saw_reorder);
    assert!(saw_delete);

    supervisor.send_message(SupervisorMessage::Shutdown)?;
    handle.await?;

    Ok(())
}

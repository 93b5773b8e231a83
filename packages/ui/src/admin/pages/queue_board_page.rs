//! Queue board page - one queue's ordered assignments, conflicts and
//! lifecycle actions.

use dioxus::prelude::*;
use queue_core::{QueueBoard, QueueStatus, detect_conflicts, move_assignment};

use crate::admin::{AssignmentRow, ConflictPanel, QueueStatusBadge};

/// Board refresh interval in milliseconds.
const REFRESH_INTERVAL_MS: u32 = 15_000;

/// Props for AdminQueueBoardPage.
#[derive(Props, Clone, PartialEq)]
pub struct AdminQueueBoardPageProps {
    pub queue_id: String,
}

/// Queue board page component.
#[component]
pub fn AdminQueueBoardPage(props: AdminQueueBoardPageProps) -> Element {
    let queue_id = use_signal(|| props.queue_id.clone());
    let mut board = use_signal(|| None::<QueueBoard>);
    let mut loading = use_signal(|| true);
    let mut saving = use_signal(|| false);
    let mut drag_from = use_signal(|| None::<usize>);
    let mut error = use_signal(|| None::<String>);

    let _board_resource = use_resource(move || async move {
        loading.set(true);
        match api::get_queue_board(queue_id()).await {
            Ok(b) => board.set(Some(b)),
            Err(e) => error.set(Some(format!("Failed to load queue: {}", e))),
        }
        loading.set(false);
    });

    // Pick up changes made by other operators, but never mid-edit.
    let _refresh = use_coroutine(move |_rx: UnboundedReceiver<()>| async move {
        loop {
            #[cfg(target_arch = "wasm32")]
            gloo_timers::future::TimeoutFuture::new(REFRESH_INTERVAL_MS).await;

            #[cfg(not(target_arch = "wasm32"))]
            tokio::time::sleep(std::time::Duration::from_millis(REFRESH_INTERVAL_MS as u64)).await;

            if drag_from().is_some() || saving() || loading() {
                continue;
            }
            if let Ok(b) = api::reload_queue_board(queue_id()).await {
                board.set(Some(b));
            }
        }
    });

    // Move locally right away, then persist. A failed save reloads the
    // board from the server so the page shows what was actually stored.
    let mut apply_move = move |from: usize, to: Option<usize>| {
        let Some(mut current) = board() else {
            return;
        };
        match move_assignment(&mut current.assignments, from, to) {
            Ok(true) => {}
            Ok(false) => return,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        }
        current.conflicts = detect_conflicts(&current.assignments);
        board.set(Some(current));

        spawn(async move {
            saving.set(true);
            match api::reorder_assignment(queue_id(), from, to).await {
                Ok(b) => board.set(Some(b)),
                Err(e) => {
                    tracing::warn!(from, ?to, "Reorder failed, reloading board: {}", e);
                    error.set(Some(format!("Failed to save the new queue order: {}", e)));
                    match api::reload_queue_board(queue_id()).await {
                        Ok(b) => board.set(Some(b)),
                        Err(e) => error.set(Some(format!("Failed to reload queue: {}", e))),
                    }
                }
            }
            saving.set(false);
        });
    };

    let set_status = move |status: QueueStatus| {
        spawn(async move {
            let result = match status {
                QueueStatus::Draft => api::revert_queue_to_draft(queue_id()).await,
                QueueStatus::Approved => api::approve_queue(queue_id()).await,
                QueueStatus::Published => api::publish_queue(queue_id()).await,
            };
            match result {
                Ok(queue) => {
                    if let Some(mut current) = board() {
                        current.queue = queue;
                        board.set(Some(current));
                    }
                }
                Err(e) => error.set(Some(format!("Failed to update queue: {}", e))),
            }
        });
    };

    rsx! {
        div { class: "page-container",
            nav { class: "breadcrumb",
                Link { to: "/admin/queues", class: "breadcrumb-link", "Queues" }
                span { class: "breadcrumb-separator", "/" }
                span { class: "breadcrumb-current",
                    {board().map(|b| b.queue.date.to_string()).unwrap_or_else(|| "Loading...".to_string())}
                }
            }

            if let Some(err) = error() {
                div { class: "error-banner",
                    span { "{err}" }
                    button {
                        onclick: move |_| error.set(None),
                        "×"
                    }
                }
            }

            if loading() && board().is_none() {
                div { class: "loading", "Loading queue..." }
            } else if let Some(b) = board() {
                {
                    let editable = b.queue.status.is_editable();
                    let total = b.assignments.len();
                    let title = b.queue.date.format("%A %d %B %Y").to_string();

                    rsx! {
                        div { class: "page-header",
                            div { class: "page-header-content",
                                div { class: "page-header-title-row",
                                    h1 { class: "page-title", "{title}" }
                                    QueueStatusBadge { status: b.queue.status }
                                    if saving() {
                                        span { class: "saving-indicator", "Saving..." }
                                    }
                                }
                                if let Some(ref notes) = b.queue.notes {
                                    p { class: "page-description", "{notes}" }
                                }
                            }
                            div { class: "page-header-actions",
                                match b.queue.status {
                                    QueueStatus::Draft => rsx! {
                                        button {
                                            class: "btn btn-primary",
                                            onclick: move |_| set_status(QueueStatus::Approved),
                                            "Approve"
                                        }
                                    },
                                    QueueStatus::Approved => rsx! {
                                        button {
                                            class: "btn btn-secondary",
                                            onclick: move |_| set_status(QueueStatus::Draft),
                                            "Back to Draft"
                                        }
                                        button {
                                            class: "btn btn-primary",
                                            onclick: move |_| set_status(QueueStatus::Published),
                                            "Publish"
                                        }
                                    },
                                    QueueStatus::Published => rsx! {
                                        span { class: "hint", "Published queues are read-only" }
                                    },
                                }
                            }
                        }

                        div { class: "stats-grid stats-grid-sm",
                            div { class: "stat-card",
                                div { class: "stat-card-value", "{b.queue.filled_slots}" }
                                div { class: "stat-card-label", "Filled" }
                            }
                            div { class: "stat-card",
                                div { class: "stat-card-value", "{b.queue.open_slots()}" }
                                div { class: "stat-card-label", "Open" }
                            }
                            div { class: "stat-card stat-card-accent",
                                div { class: "stat-card-value", "{total}" }
                                div { class: "stat-card-label", "Assignments" }
                            }
                            div { class: "stat-card stat-card-danger",
                                div { class: "stat-card-value", "{b.conflicts.len()}" }
                                div { class: "stat-card-label", "Conflicts" }
                            }
                        }

                        ConflictPanel { conflicts: b.conflicts.clone() }

                        div { class: "card",
                            div { class: "card-header",
                                h2 { class: "card-title", "Assignments" }
                                if editable {
                                    span { class: "hint", "Drag rows or use the arrows to reorder" }
                                }
                            }

                            if b.assignments.is_empty() {
                                div { class: "empty-state",
                                    p { "No assignments in this queue" }
                                }
                            } else {
                                div { class: "table-container",
                                    table { class: "data-table",
                                        thead {
                                            tr {
                                                th { "#" }
                                                th { "Track" }
                                                th { "Genre" }
                                                th { "Supporter" }
                                                th { class: "text-right", "Credits" }
                                                th { class: "text-right", "Move" }
                                            }
                                        }
                                        tbody {
                                            for (index, assignment) in b.assignments.iter().enumerate() {
                                                AssignmentRow {
                                                    key: "{assignment.id}",
                                                    assignment: assignment.clone(),
                                                    index,
                                                    total,
                                                    editable: editable && !saving(),
                                                    flagged: b.conflicts.iter().any(|c| c.involves(assignment.id)),
                                                    dragging: drag_from() == Some(index),
                                                    on_drag_start: move |i| drag_from.set(Some(i)),
                                                    on_drop: move |to| {
                                                        if let Some(from) = drag_from.take() {
                                                            apply_move(from, Some(to));
                                                        }
                                                    },
                                                    on_drag_end: move |_| {
                                                        // Dropped outside the list: nothing moves.
                                                        if let Some(from) = drag_from.take() {
                                                            apply_move(from, None);
                                                        }
                                                    },
                                                    on_move: move |(from, to)| apply_move(from, Some(to)),
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            } else {
                div { class: "empty-state",
                    p { "Queue not found" }
                }
            }
        }
    }
}

//! Queues list page - displays all daily queues with fill and status.

use dioxus::prelude::*;
use queue_core::{Queue, QueueStatus};

use crate::admin::{CreateQueueForm, QueueStatusBadge};

/// Queues list page component.
#[component]
pub fn AdminQueuesPage() -> Element {
    let mut queues = use_signal(Vec::<Queue>::new);
    let mut error = use_signal(|| None::<String>);
    let mut loaded = use_signal(|| false);
    let mut show_create_form = use_signal(|| false);

    let queues_resource = use_resource(move || async move { api::list_queues().await });

    use_effect(move || {
        if loaded() {
            return;
        }
        match queues_resource.read().as_ref() {
            Some(Ok(q)) => {
                queues.set(q.clone());
                loaded.set(true);
            }
            Some(Err(e)) => {
                error.set(Some(format!("Failed to load queues: {}", e)));
                loaded.set(true);
            }
            None => {}
        }
    });

    let refresh = move || {
        spawn(async move {
            match api::list_queues().await {
                Ok(q) => queues.set(q),
                Err(e) => error.set(Some(format!("Failed to load queues: {}", e))),
            }
        });
    };

    let on_created = move |_queue: Queue| {
        show_create_form.set(false);
        refresh();
    };

    let on_delete = move |queue: Queue| {
        let queue_id = queue.id.to_string();
        spawn(async move {
            if let Err(e) = api::delete_queue(queue_id).await {
                error.set(Some(format!("Failed to delete queue: {}", e)));
            } else {
                refresh();
            }
        });
    };

    let count = |status: QueueStatus| queues().iter().filter(|q| q.status == status).count();

    rsx! {
        div { class: "page-container",
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Queues" }
                    p { class: "page-description", "Plan, review and publish the daily support queues" }
                }
                div { class: "page-header-actions",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| show_create_form.set(true),
                        "+ New Queue"
                    }
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

            if show_create_form() {
                CreateQueueForm {
                    on_created,
                    on_cancel: move |_| show_create_form.set(false),
                }
            }

            div { class: "stats-grid",
                div { class: "stat-card",
                    div { class: "stat-card-value", "{queues().len()}" }
                    div { class: "stat-card-label", "Total Queues" }
                }
                div { class: "stat-card",
                    div { class: "stat-card-value", "{count(QueueStatus::Draft)}" }
                    div { class: "stat-card-label", "Draft" }
                }
                div { class: "stat-card stat-card-accent",
                    div { class: "stat-card-value", "{count(QueueStatus::Approved)}" }
                    div { class: "stat-card-label", "Approved" }
                }
                div { class: "stat-card stat-card-success",
                    div { class: "stat-card-value", "{count(QueueStatus::Published)}" }
                    div { class: "stat-card-label", "Published" }
                }
            }

            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "All Queues" }
                }

                if queues().is_empty() {
                    div { class: "empty-state",
                        div { class: "empty-state-icon", "▦" }
                        p { "No queues yet" }
                        p { class: "hint", "Create a queue for a day to get started" }
                    }
                } else {
                    div { class: "table-container",
                        table { class: "data-table",
                            thead {
                                tr {
                                    th { "Date" }
                                    th { "Status" }
                                    th { class: "text-right", "Filled" }
                                    th { "Notes" }
                                    th { class: "text-right", "Actions" }
                                }
                            }
                            tbody {
                                for queue in queues().iter() {
                                    {
                                        let queue_for_delete = queue.clone();
                                        let queue_id = queue.id.to_string();
                                        let date = queue.date.format("%a %d %b %Y").to_string();
                                        let deletable = queue.status.is_editable();
                                        let notes = queue.notes.clone().unwrap_or_default();

                                        rsx! {
                                            tr { class: "data-row", key: "{queue_id}",
                                                td {
                                                    Link {
                                                        to: "/admin/queues/{queue_id}",
                                                        class: "queue-link",
                                                        span { class: "queue-link-name", "{date}" }
                                                    }
                                                }
                                                td {
                                                    QueueStatusBadge { status: queue.status }
                                                }
                                                td { class: "text-right tabular-nums",
                                                    "{queue.filled_slots} / {queue.total_slots}"
                                                }
                                                td { class: "text-muted", "{notes}" }
                                                td { class: "text-right",
                                                    if deletable {
                                                        button {
                                                            class: "btn btn-small btn-cancel",
                                                            onclick: move |_| on_delete(queue_for_delete.clone()),
                                                            "Delete"
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

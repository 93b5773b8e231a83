//! Status badge components.

use dioxus::prelude::*;
use queue_core::{ConflictKind, QueueStatus};

/// Badge for displaying a queue's approval status.
#[component]
pub fn QueueStatusBadge(status: QueueStatus) -> Element {
    let (bg_class, text) = match status {
        QueueStatus::Draft => ("badge-draft", "Draft"),
        QueueStatus::Approved => ("badge-approved", "Approved"),
        QueueStatus::Published => ("badge-published", "Published"),
    };

    rsx! {
        span {
            class: "status-badge {bg_class}",
            {text}
        }
    }
}

/// Badge naming the kind of a conflict.
#[component]
pub fn ConflictBadge(kind: ConflictKind) -> Element {
    let (bg_class, text) = match kind {
        ConflictKind::DuplicateSupporter => ("badge-duplicate", "Duplicate supporter"),
        ConflictKind::GenreClustering => ("badge-cluster", "Genre cluster"),
    };

    rsx! {
        span {
            class: "status-badge {bg_class}",
            {text}
        }
    }
}

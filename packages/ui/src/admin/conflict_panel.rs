//! Panel listing detected conflicts for a queue.

use dioxus::prelude::*;
use queue_core::Conflict;

use super::ConflictBadge;

#[component]
pub fn ConflictPanel(conflicts: Vec<Conflict>) -> Element {
    rsx! {
        div { class: "card conflict-panel",
            div { class: "card-header",
                h2 { class: "card-title", "Conflicts" }
                span { class: "card-count", "{conflicts.len()}" }
            }

            if conflicts.is_empty() {
                div { class: "empty-state empty-state-sm",
                    p { "No conflicts detected" }
                }
            } else {
                ul { class: "conflict-list",
                    for (i, conflict) in conflicts.iter().enumerate() {
                        li { key: "{i}", class: "conflict-item",
                            ConflictBadge { kind: conflict.kind() }
                            span { class: "conflict-message", "{conflict.message()}" }
                        }
                    }
                }
                p { class: "hint", "Conflicts are warnings. The queue can still be approved." }
            }
        }
    }
}

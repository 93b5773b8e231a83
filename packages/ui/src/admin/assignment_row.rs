//! Draggable table row for one queue assignment.

use dioxus::prelude::*;
use queue_core::QueueAssignment;

/// Props for AssignmentRow component.
#[derive(Props, Clone, PartialEq)]
pub struct AssignmentRowProps {
    pub assignment: QueueAssignment,
    /// 0-based index in the board's list.
    pub index: usize,
    /// Number of rows in the list.
    pub total: usize,
    /// Whether the row may be moved.
    #[props(default = true)]
    pub editable: bool,
    /// Whether the row is part of a detected conflict.
    #[props(default = false)]
    pub flagged: bool,
    /// Whether this row is currently being dragged.
    #[props(default = false)]
    pub dragging: bool,
    /// A drag started on this row.
    pub on_drag_start: EventHandler<usize>,
    /// Something was dropped onto this row.
    pub on_drop: EventHandler<usize>,
    /// The drag ended, dropped or not.
    pub on_drag_end: EventHandler<()>,
    /// Move from the first index to the second.
    pub on_move: EventHandler<(usize, usize)>,
}

#[component]
pub fn AssignmentRow(props: AssignmentRowProps) -> Element {
    let assignment = props.assignment.clone();
    let index = props.index;
    let editable = props.editable;

    let track = assignment
        .submission
        .as_ref()
        .map(|s| s.track_name.clone())
        .unwrap_or_else(|| "Unknown track".to_string());
    let genre = assignment.genre().to_string();
    let supporter = assignment.supporter_name().to_string();
    let artist = assignment.artist_name().to_string();

    let mut classes = vec!["data-row", "assignment-row"];
    if props.flagged {
        classes.push("row-flagged");
    }
    if props.dragging {
        classes.push("row-dragging");
    }
    let class = classes.join(" ");

    rsx! {
        tr {
            class: "{class}",
            draggable: if editable { "true" } else { "false" },
            ondragstart: move |_| {
                if editable {
                    props.on_drag_start.call(index);
                }
            },
            ondragover: move |e: DragEvent| e.prevent_default(),
            ondrop: move |e: DragEvent| {
                e.prevent_default();
                props.on_drop.call(index);
            },
            ondragend: move |_| props.on_drag_end.call(()),

            td { class: "position-cell tabular-nums",
                if editable {
                    span { class: "drag-handle", "⠿" }
                }
                "{assignment.position}"
            }
            td {
                div { class: "track-cell",
                    span { class: "track-name", "{track}" }
                    span { class: "track-artist", "{artist}" }
                }
            }
            td { class: "capitalize", "{genre}" }
            td { "{supporter}" }
            td { class: "text-right tabular-nums", "{assignment.credits_allocated}" }
            td { class: "text-right",
                if editable {
                    button {
                        class: "btn btn-small btn-icon",
                        disabled: index == 0,
                        title: "Move up",
                        onclick: move |_| props.on_move.call((index, index.saturating_sub(1))),
                        "▲"
                    }
                    button {
                        class: "btn btn-small btn-icon",
                        disabled: index + 1 >= props.total,
                        title: "Move down",
                        onclick: move |_| props.on_move.call((index, index + 1)),
                        "▼"
                    }
                }
            }
        }
    }
}

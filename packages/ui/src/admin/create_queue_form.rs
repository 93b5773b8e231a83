//! Create queue form component.

use dioxus::prelude::*;
use queue_core::{MAX_SLOTS, NewQueue, Queue};

/// Props for CreateQueueForm component.
#[derive(Props, Clone, PartialEq)]
pub struct CreateQueueFormProps {
    /// Callback with the created queue.
    pub on_created: EventHandler<Queue>,
    /// Callback when form is cancelled.
    pub on_cancel: EventHandler<()>,
}

/// Form component for creating a new daily queue.
#[component]
pub fn CreateQueueForm(props: CreateQueueFormProps) -> Element {
    let mut date = use_signal(String::new);
    let mut slots = use_signal(|| "20".to_string());
    let mut notes = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    // Validate as the user types; the server validates again.
    let input = use_memo(move || -> Result<NewQueue, String> {
        let total_slots = slots()
            .trim()
            .parse::<u32>()
            .map_err(|_| "Slots must be a whole number".to_string())?;
        let input = NewQueue {
            date: date(),
            total_slots,
            notes: Some(notes()),
        };
        input.clone().validate().map_err(|e| e.to_string())?;
        Ok(input)
    });
    let validation = match (date().is_empty(), input()) {
        (true, _) | (false, Ok(_)) => None,
        (false, Err(e)) => Some(e),
    };

    let submit = move |_| {
        let Ok(request) = input() else {
            return;
        };

        spawn(async move {
            submitting.set(true);
            error.set(None);

            match api::create_queue(request.date, request.total_slots, request.notes).await {
                Ok(queue) => {
                    props.on_created.call(queue);
                }
                Err(e) => {
                    error.set(Some(format!("Failed to create queue: {}", e)));
                }
            }

            submitting.set(false);
        });
    };

    rsx! {
        div { class: "create-queue-form",
            h3 { "Create New Queue" }

            if let Some(err) = error() {
                div { class: "error-message", "{err}" }
            }

            div { class: "form-group",
                label { "Date" }
                input {
                    r#type: "date",
                    value: "{date}",
                    oninput: move |e| date.set(e.value()),
                }
                if let Some(ref message) = validation {
                    span { class: "field-error", "{message}" }
                }
            }

            div { class: "form-group",
                label { "Slots (1-{MAX_SLOTS})" }
                input {
                    r#type: "number",
                    min: "1",
                    max: "{MAX_SLOTS}",
                    value: "{slots}",
                    oninput: move |e| slots.set(e.value()),
                }
            }

            div { class: "form-group",
                label { "Notes" }
                textarea {
                    rows: 3,
                    value: "{notes}",
                    oninput: move |e| notes.set(e.value()),
                }
            }

            div { class: "form-actions",
                button {
                    class: "btn btn-primary",
                    disabled: submitting() || input().is_err(),
                    onclick: submit,
                    if submitting() { "Creating..." } else { "Create Queue" }
                }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| props.on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}

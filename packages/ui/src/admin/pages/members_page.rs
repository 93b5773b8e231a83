//! Members page - credit balances and submissions waiting for review.

use dioxus::prelude::*;
use queue_core::{MemberStatus, SubmissionStatus};

#[component]
pub fn AdminMembersPage() -> Element {
    let members = use_resource(move || async move { api::list_members().await });
    let pending = use_resource(move || async move {
        api::list_submissions(Some(SubmissionStatus::Pending.as_str().to_string())).await
    });

    rsx! {
        div { class: "page-container",
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Members" }
                    p { class: "page-description", "Artists in the group and their support credits" }
                }
            }

            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "All Members" }
                }

                match members.read().as_ref() {
                    None => rsx! { div { class: "loading", "Loading members..." } },
                    Some(Err(e)) => rsx! {
                        div { class: "error-banner", span { "Failed to load members: {e}" } }
                    },
                    Some(Ok(list)) if list.is_empty() => rsx! {
                        div { class: "empty-state", p { "No members yet" } }
                    },
                    Some(Ok(list)) => rsx! {
                        div { class: "table-container",
                            table { class: "data-table",
                                thead {
                                    tr {
                                        th { "Name" }
                                        th { "Email" }
                                        th { "Status" }
                                        th { class: "text-right", "Credits" }
                                    }
                                }
                                tbody {
                                    for member in list.iter() {
                                        tr { class: "data-row", key: "{member.id}",
                                            td { "{member.name}" }
                                            td { class: "text-muted", "{member.email}" }
                                            td {
                                                if member.status == MemberStatus::Suspended {
                                                    span { class: "status-badge badge-suspended", "Suspended" }
                                                } else {
                                                    span { class: "status-badge badge-active", "Active" }
                                                }
                                            }
                                            td {
                                                class: if member.credits < 0 { "text-right tabular-nums text-danger" } else { "text-right tabular-nums" },
                                                "{member.credits}"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                }
            }

            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "Pending Submissions" }
                }

                match pending.read().as_ref() {
                    None => rsx! { div { class: "loading", "Loading submissions..." } },
                    Some(Err(e)) => rsx! {
                        div { class: "error-banner", span { "Failed to load submissions: {e}" } }
                    },
                    Some(Ok(list)) if list.is_empty() => rsx! {
                        div { class: "empty-state empty-state-sm", p { "Nothing waiting for review" } }
                    },
                    Some(Ok(list)) => rsx! {
                        ul { class: "submission-list",
                            for submission in list.iter() {
                                li { key: "{submission.id}", class: "submission-item",
                                    span { class: "track-name", "{submission.track_name}" }
                                    span { class: "track-artist", "{submission.artist_name}" }
                                    span { class: "capitalize text-muted",
                                        {submission.family.clone().unwrap_or_default()}
                                    }
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}

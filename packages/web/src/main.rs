// Dioxus `rsx!` macro expands to unwraps internally; allow to avoid false positives.
#![allow(clippy::disallowed_methods)]

use dioxus::prelude::*;

use ui::admin::{AdminMembersPage, AdminQueueBoardPage, AdminQueuesPage};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},

    // Admin routes with sidebar navigation
    #[layout(AdminLayout)]
        #[route("/admin")]
        AdminRedirect {},
        #[route("/admin/queues")]
        AdminQueues {},
        #[route("/admin/queues/:queue_id")]
        AdminQueueBoard { queue_id: String },
        #[route("/admin/members")]
        AdminMembers {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const ADMIN_CSS: Asset = asset!("/assets/admin.css");

fn main() {
    #[cfg(feature = "server")]
    {
        use tracing_subscriber::EnvFilter;

        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();

        tracing::info!("Starting queue admin");
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ADMIN_CSS }

        Router::<Route> {}
    }
}

/// Layout for admin routes with sidebar navigation.
#[component]
fn AdminLayout() -> Element {
    rsx! {
        div { class: "admin-layout",
            aside { class: "admin-sidebar",
                div { class: "sidebar-header",
                    h1 { class: "sidebar-logo", "Engagement Queue" }
                }
                nav { class: "sidebar-nav",
                    div { class: "nav-section",
                        span { class: "nav-section-title", "Menu" }
                        Link {
                            to: Route::AdminQueues {},
                            class: "nav-link",
                            active_class: "active",
                            span { class: "nav-icon", "▦" }
                            span { "Queues" }
                        }
                        Link {
                            to: Route::AdminMembers {},
                            class: "nav-link",
                            active_class: "active",
                            span { class: "nav-icon", "☺" }
                            span { "Members" }
                        }
                    }
                }
            }

            main { class: "admin-main",
                Outlet::<Route> {}
            }
        }
    }
}

/// The admin is the whole app; send the root there.
#[component]
fn Home() -> Element {
    let nav = use_navigator();
    use_effect(move || {
        nav.replace(Route::AdminQueues {});
    });
    rsx! {}
}

/// Redirect /admin to /admin/queues.
#[component]
fn AdminRedirect() -> Element {
    let nav = use_navigator();
    use_effect(move || {
        nav.replace(Route::AdminQueues {});
    });
    rsx! {}
}

#[component]
fn AdminQueues() -> Element {
    rsx! {
        AdminQueuesPage {}
    }
}

/// Board for one queue. Keyed by id so switching queues starts fresh.
#[component]
fn AdminQueueBoard(queue_id: String) -> Element {
    rsx! {
        AdminQueueBoardPage { key: "{queue_id}", queue_id }
    }
}

#[component]
fn AdminMembers() -> Element {
    rsx! {
        AdminMembersPage {}
    }
}

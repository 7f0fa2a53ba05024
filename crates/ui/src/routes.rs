use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::state::use_toasts;
use crate::views::{MenuView, ProfileView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", MenuView)] Menu {},
        #[route("/part/:part_key", QuizView)] Quiz { part_key: String },
        #[route("/profile", ProfileView)] Profile {},
}

#[component]
fn Layout() -> Element {
    let toasts = use_toasts();

    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { "Sorting Quiz" }
                nav {
                    ul {
                        li { Link { to: Route::Menu {}, "Parts" } }
                        li { Link { to: Route::Profile {}, "Final Profile" } }
                    }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
            if let Some(message) = toasts.current() {
                div { class: "toast-container",
                    div { class: "toast", role: "status", aria_live: "polite", "{message.text}" }
                }
            }
        }
    }
}

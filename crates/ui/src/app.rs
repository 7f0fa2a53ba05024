use dioxus::prelude::*;
use dioxus_router::Router;

use quiz_core::model::{FinalProfile, QuizSession};

use crate::routes::Route;
use crate::views::state::provide_toasts;

#[component]
pub fn App() -> Element {
    // Session and profile state live for the life of the process and are
    // shared by every view; all mutation goes through `QuizSession` methods.
    use_context_provider(|| Signal::new(QuizSession::new()));
    use_context_provider(|| Signal::new(None::<FinalProfile>));
    provide_toasts();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Sorting Quiz" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::model::{FinalProfile, QuizSession};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::state::use_toasts;
use crate::vm::{map_completed_parts, map_menu_parts};

#[component]
pub fn MenuView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let toasts = use_toasts();
    let mut session = use_context::<Signal<QuizSession>>();
    let mut profile = use_context::<Signal<Option<FinalProfile>>>();
    let mut show_completed = use_signal(|| false);
    let mut confirm_clear = use_signal(|| false);

    let Some(catalog) = ctx.catalog() else {
        return rsx! {
            div { class: "page menu-page",
                p { class: "menu-empty", "No quiz available." }
            }
        };
    };

    let parts = map_menu_parts(&catalog, &session.read());
    let completed_cards = map_completed_parts(&catalog, &session.read());
    let flow = ctx.quiz_flow();

    let part_cards = parts.iter().map(|part| {
        let key = part.key.clone();
        let route_key = key.to_string();
        let catalog = catalog.clone();
        rsx! {
            button {
                class: "part-card",
                r#type: "button",
                onclick: move |_| {
                    match session.write().open_part(&catalog, &key) {
                        Ok(()) => {
                            let _ = navigator.push(Route::Quiz { part_key: route_key.clone() });
                        }
                        Err(err) => toasts.show(err.to_string()),
                    }
                },
                span { class: "part-icon", "{part.icon}" }
                div { class: "part-meta",
                    h4 { "{part.name}" }
                    p { "{part.description}" }
                    small { "Questions: {part.question_count}" }
                }
                div { class: "part-status",
                    if part.completed {
                        small { class: "status-done", "Completed \u{2713}" }
                    } else {
                        small { class: "status-pending", "Not completed" }
                    }
                }
            }
        }
    });

    let completed_panel = completed_cards.iter().map(|card| {
        let retake_key = card.key.clone();
        let route_key = retake_key.to_string();
        let remove_key = card.key.clone();
        let catalog = catalog.clone();
        rsx! {
            div { class: "part-result",
                h4 { "{card.name}" }
                p { "Result: " strong { "{card.result_label}" } }
                pre { "{card.scores_pretty}" }
                small { class: "completed-at", "Completed {card.completed_at_label}" }
                div { class: "part-result-actions",
                    button {
                        class: "btn small",
                        r#type: "button",
                        onclick: move |_| {
                            match session.write().open_part(&catalog, &retake_key) {
                                Ok(()) => {
                                    let _ = navigator.push(Route::Quiz { part_key: route_key.clone() });
                                }
                                Err(err) => toasts.show(err.to_string()),
                            }
                        },
                        "Retake"
                    }
                    button {
                        class: "btn small",
                        r#type: "button",
                        onclick: move |_| session.write().remove_completed(&remove_key),
                        "Remove"
                    }
                }
            }
        }
    });

    rsx! {
        div { class: "page menu-page",
            header { class: "view-header",
                h2 { class: "view-title", "Pick a part" }
                p { class: "view-subtitle", "Each part is its own mini-quiz. Take them in any order." }
            }
            div { class: "parts-grid",
                {part_cards}
            }
            div { class: "menu-actions",
                button {
                    class: "btn",
                    r#type: "button",
                    onclick: move |_| {
                        let shown = show_completed();
                        show_completed.set(!shown);
                    },
                    "View Completed"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        let flow = flow.clone();
                        spawn(async move {
                            let snapshot = session.peek().clone();
                            match flow.request_final_profile(&snapshot).await {
                                Ok(result) => {
                                    profile.set(Some(result));
                                    let _ = navigator.push(Route::Profile {});
                                }
                                Err(err) => toasts.show(err.to_string()),
                            }
                        });
                    },
                    "Finalize"
                }
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    onclick: move |_| confirm_clear.set(true),
                    "Clear All"
                }
            }
            if show_completed() {
                div { class: "completed-panel",
                    h3 { "Completed Parts" }
                    if completed_cards.is_empty() {
                        p { class: "menu-empty", "No parts completed yet." }
                    } else {
                        {completed_panel}
                    }
                }
            }
            if confirm_clear() {
                div {
                    class: "modal-overlay",
                    onclick: move |_| confirm_clear.set(false),
                    div {
                        class: "modal",
                        onclick: move |evt| evt.stop_propagation(),
                        h3 { class: "modal-title", "Clear completed parts?" }
                        p { class: "modal-body",
                            "This removes every completed part and its result. It cannot be undone."
                        }
                        div { class: "modal-actions",
                            button {
                                class: "btn",
                                r#type: "button",
                                onclick: move |_| confirm_clear.set(false),
                                "Cancel"
                            }
                            button {
                                class: "btn btn-danger",
                                r#type: "button",
                                onclick: move |_| {
                                    session.write().clear_all();
                                    profile.set(None);
                                    show_completed.set(false);
                                    confirm_clear.set(false);
                                    toasts.show("All parts cleared.");
                                },
                                "Clear"
                            }
                        }
                    }
                }
            }
        }
    }
}

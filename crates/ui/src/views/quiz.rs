use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use quiz_core::model::{
    AdvanceOutcome, Direction, PartKey, QuizSession, SessionError,
};
use services::QuizFlowError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::state::use_toasts;
use crate::vm::map_question;

#[component]
pub fn QuizView(part_key: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let toasts = use_toasts();
    let mut session = use_context::<Signal<QuizSession>>();

    let Some(catalog) = ctx.catalog() else {
        return rsx! {
            div { class: "page quiz-page",
                p { class: "menu-empty", "No quiz available." }
            }
        };
    };

    let requested = PartKey::new(part_key).ok();
    let part = requested
        .as_ref()
        .filter(|key| session.read().active_part() == Some(*key))
        .and_then(|key| catalog.get(key));

    let Some(part) = part else {
        // Reached by URL without opening the part first, or after submission.
        return rsx! {
            div { class: "page quiz-page",
                p { class: "menu-empty", "This part is not open." }
                Link { to: Route::Menu {}, "Back to the menu" }
            }
        };
    };

    let Some(vm) = map_question(part, &session.read()) else {
        return rsx! {
            div { class: "page quiz-page",
                p { class: "menu-empty", "This part has no questions." }
                Link { to: Route::Menu {}, "Back to the menu" }
            }
        };
    };

    let part_name = part.name().to_string();
    let part_desc = part.description().to_string();
    let flow = ctx.quiz_flow();

    let mut advance = move |direction: Direction| {
        let outcome = session.write().advance(direction);
        if outcome == AdvanceOutcome::AtEnd {
            toasts.show("Last question reached. Submit the part.");
        }
    };

    let submit = move |_| {
        let flow = flow.clone();
        spawn(async move {
            let mut working = session.peek().clone();
            match flow.submit_active_part(&mut working).await {
                Ok((_, result)) => {
                    session.set(working);
                    toasts.show(format!("Part scored: {}", result.result_label()));
                    let _ = navigator.push(Route::Menu {});
                }
                Err(err @ QuizFlowError::Session(SessionError::Unanswered { .. })) => {
                    // The pointer was repositioned to the first unanswered
                    // question; keep that.
                    session.set(working);
                    toasts.show(err.to_string());
                }
                Err(err) => toasts.show(err.to_string()),
            }
        });
    };

    let options = vm.options.iter().map(|option| {
        let value = option.value.clone();
        let class = if option.selected {
            "option-label selected"
        } else {
            "option-label"
        };
        rsx! {
            button {
                class: "{class}",
                r#type: "button",
                onclick: move |_| session.write().select_answer(value.clone()),
                span { class: "option-content", "{option.value}" }
            }
        }
    });

    rsx! {
        div {
            class: "page quiz-page",
            tabindex: "0",
            onkeydown: move |evt| match evt.key() {
                Key::ArrowRight => advance(Direction::Next),
                Key::ArrowLeft => advance(Direction::Prev),
                _ => {}
            },
            header { class: "view-header",
                h2 { class: "view-title", "{part_name}" }
                p { class: "view-subtitle", "{part_desc}" }
            }
            div {
                class: "progress",
                role: "progressbar",
                aria_valuenow: "{vm.progress_pct}",
                div { class: "progress-inner", style: "width: {vm.progress_pct}%" }
            }
            p { class: "progress-label", "Answered {vm.answered} of {vm.total}" }
            div { class: "question",
                h3 { "{vm.number}. {vm.prompt}" }
                div { class: "options",
                    if vm.options.is_empty() {
                        p { class: "menu-empty", "This question has no options." }
                    } else {
                        {options}
                    }
                }
            }
            div { class: "quiz-actions",
                button {
                    class: "btn",
                    r#type: "button",
                    disabled: vm.at_first,
                    onclick: move |_| advance(Direction::Prev),
                    "Previous"
                }
                button {
                    class: "btn",
                    r#type: "button",
                    onclick: move |_| advance(Direction::Next),
                    "Next"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: submit,
                    "Submit Part"
                }
            }
            p { class: "quiz-hint", "Question {vm.number} of {vm.total}" }
        }
    }
}

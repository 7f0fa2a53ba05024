use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::model::FinalProfile;

use crate::routes::Route;
use crate::vm::map_profile;

#[component]
pub fn ProfileView() -> Element {
    let profile = use_context::<Signal<Option<FinalProfile>>>();

    let Some(profile) = profile() else {
        return rsx! {
            div { class: "page profile-page",
                p { class: "menu-empty",
                    "No profile yet. Complete at least one part, then finalize from the menu."
                }
                Link { to: Route::Menu {}, "Back to the menu" }
            }
        };
    };

    let vm = map_profile(&profile);

    let fields = vm.fields.iter().map(|field| {
        rsx! {
            div { class: "profile-field",
                span { class: "profile-field-label", "{field.label}" }
                span { class: "profile-field-value", "{field.value}" }
            }
        }
    });

    let bars = vm.bars.iter().map(|bar| {
        rsx! {
            div { class: "house-score-bar",
                span { class: "house-score-name", "{bar.house}" }
                div {
                    class: "house-score-fill {bar.house}",
                    style: "width: {bar.width_pct}%",
                    "{bar.value}"
                }
            }
        }
    });

    rsx! {
        div { class: "page profile-page",
            header { class: "view-header",
                h2 { class: "view-title", "Your Ultimate Hogwarts Profile" }
                p { class: "view-subtitle", "{vm.house_desc}" }
            }
            div { class: "profile-badge", span { class: "crest", "{vm.crest}" } }
            div { class: "profile-fields",
                {fields}
            }
            div { class: "house-scores",
                h3 { "House affinity" }
                {bars}
            }
            div { class: "profile-extras",
                h3 { "Extras" }
                pre { "{vm.extras_pretty}" }
            }
            Link { to: Route::Menu {}, "Back to the menu" }
        }
    }
}

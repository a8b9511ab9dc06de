use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ProgressVm, map_progress};

#[component]
pub fn ProgressView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let resource = use_resource(move || {
        let quiz_loop = quiz_loop.clone();
        async move {
            let overview = quiz_loop.overview().await;
            Ok::<_, ViewError>(map_progress(&overview))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page progress-page",
            header { class: "view-header",
                h2 { class: "view-title", "Progress" }
                p { class: "view-subtitle", "{ctx.word_list_label()}" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(vm) => rsx! {
                    ProgressPanel { vm }
                },
            }
        }
    }
}

#[component]
fn ProgressPanel(vm: ProgressVm) -> Element {
    rsx! {
        ul { class: "progress-counts",
            li { "{vm.asked_label}" }
            li { "{vm.correct_label}" }
            li { "{vm.wrong_label}" }
            li { "{vm.accuracy_label}" }
            li { "{vm.seen_label}" }
        }
        WordList { title: "Difficult words", words: vm.difficult.clone() }
        WordList { title: "Wrong words", words: vm.wrong.clone() }
    }
}

#[component]
fn WordList(title: &'static str, words: Vec<String>) -> Element {
    rsx! {
        section { class: "progress-words",
            h3 { "{title}" }
            if words.is_empty() {
                p { class: "progress-words__empty", "None yet." }
            } else {
                ul {
                    for word in words.iter() {
                        li { key: "{word}", "{word}" }
                    }
                }
            }
        }
    }
}

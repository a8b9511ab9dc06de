use dioxus::prelude::*;
use services::QuizIntent;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizScreenVm, QuizVm, start_quiz};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();
    let vm = use_signal(|| None::<QuizVm>);
    let confirm_reset = use_signal(|| false);

    let quiz_loop_for_resource = quiz_loop.clone();
    let resource = use_resource(move || {
        let quiz_loop = quiz_loop_for_resource.clone();
        let mut vm = vm;
        async move {
            let started = start_quiz(&quiz_loop).await?;
            vm.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let dispatch_intent = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |intent: QuizIntent| {
            let mut vm = vm;
            let pending = vm
                .write()
                .as_mut()
                .and_then(|vm| vm.apply(&quiz_loop, intent));
            if let Some(pending) = pending {
                let quiz_loop = quiz_loop.clone();
                spawn(async move {
                    quiz_loop.commit(pending).await;
                });
            }
        })
    };

    let reset_step = use_callback(move |step: ResetStep| {
        let mut confirm_reset = confirm_reset;
        match step {
            ResetStep::Ask => confirm_reset.set(true),
            ResetStep::Cancel => confirm_reset.set(false),
            ResetStep::Confirm => {
                confirm_reset.set(false);
                dispatch_intent.call(QuizIntent::Reset);
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, reset_step);
            }
        }
    }

    let screen = vm.read().as_ref().map(QuizVm::screen);

    rsx! {
        div { class: "page quiz-page",
            header { class: "view-header",
                h2 { class: "view-title", "Vocabulary Quiz" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "quiz-error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(()) => match screen {
                    Some(screen) => rsx! {
                        QuizBoard {
                            screen,
                            confirm_reset: confirm_reset(),
                            on_intent: dispatch_intent,
                            on_reset: reset_step,
                        }
                    },
                    None => rsx! {
                        p { "Loading..." }
                    },
                },
            }
        }
    }
}

/// Steps of the two-step reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResetStep {
    Ask,
    Confirm,
    Cancel,
}

#[component]
fn QuizBoard(
    screen: QuizScreenVm,
    confirm_reset: bool,
    on_intent: EventHandler<QuizIntent>,
    on_reset: EventHandler<ResetStep>,
) -> Element {
    let mark_class = if screen.difficult_active {
        "btn quiz-mark quiz-mark--active"
    } else {
        "btn quiz-mark"
    };

    rsx! {
        div { class: "quiz-status",
            span { class: "quiz-status__stats", "{screen.stats_label}" }
            span { class: "quiz-status__mode", "{screen.mode_label}" }
            span { class: "quiz-status__remaining", "{screen.remaining_label}" }
        }
        if let Some(prompt) = screen.prompt.as_deref() {
            div { class: "quiz-question",
                p { class: "quiz-term", "{prompt}" }
            }
            div { class: "quiz-options",
                for (position, option) in screen.options.iter().enumerate() {
                    button {
                        key: "{position}",
                        class: "{option.class}",
                        r#type: "button",
                        disabled: !screen.accepts_answer,
                        onclick: move |_| on_intent.call(QuizIntent::Answer(position)),
                        "{option.label}"
                    }
                }
                button {
                    class: "{screen.dont_know_class}",
                    r#type: "button",
                    disabled: !screen.accepts_answer,
                    onclick: move |_| on_intent.call(QuizIntent::DontKnow),
                    "I don't know"
                }
            }
        } else if screen.exhausted {
            p { class: "quiz-empty", "No questions available." }
        }
        if let Some(notice) = screen.notice {
            p { class: "quiz-notice", "{notice}" }
        }
        div { class: "quiz-actions",
            button {
                class: "btn btn-primary",
                id: "quiz-next",
                r#type: "button",
                disabled: !screen.can_advance,
                onclick: move |_| on_intent.call(QuizIntent::Next),
                "Next"
            }
            button {
                class: "{mark_class}",
                id: "quiz-mark",
                r#type: "button",
                disabled: !screen.can_mark,
                onclick: move |_| on_intent.call(QuizIntent::MarkDifficult),
                "Mark difficult"
            }
            button {
                class: "btn btn-secondary",
                id: "quiz-difficult-wrong",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::StartDifficultWrong),
                "Difficult + wrong test"
            }
            button {
                class: "btn btn-secondary",
                id: "quiz-full",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::StartFull),
                "Full test"
            }
            button {
                class: "btn btn-danger",
                id: "quiz-reset",
                r#type: "button",
                onclick: move |_| on_reset.call(ResetStep::Ask),
                "Reset"
            }
        }
        if confirm_reset {
            div { class: "quiz-confirm", role: "alertdialog",
                p { "Reset all progress? This cannot be undone." }
                button {
                    class: "btn btn-danger",
                    id: "quiz-reset-confirm",
                    r#type: "button",
                    onclick: move |_| on_reset.call(ResetStep::Confirm),
                    "Confirm"
                }
                button {
                    class: "btn btn-secondary",
                    id: "quiz-reset-cancel",
                    r#type: "button",
                    onclick: move |_| on_reset.call(ResetStep::Cancel),
                    "Cancel"
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    reset: Rc<RefCell<Option<Callback<ResetStep>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, reset: Callback<ResetStep>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.reset.borrow_mut() = Some(reset);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn reset(&self) -> Callback<ResetStep> {
        (*self.reset.borrow()).expect("quiz reset registered")
    }
}

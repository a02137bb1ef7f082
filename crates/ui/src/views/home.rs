use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::model::{QuizMode, StartFrom};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::HomeVm;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HomeIntent {
    RequestReset,
    CancelReset,
    ConfirmReset,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();

    let mut start_input = use_signal(|| "1".to_string());
    let confirm_reset = use_signal(|| false);
    let notice = use_signal(|| None::<&'static str>);
    let error = use_signal(|| None::<ViewError>);

    let loop_for_overview = quiz_loop.clone();
    let overview = use_resource(move || {
        let quiz_loop = loop_for_overview.clone();
        async move {
            let overview = quiz_loop.progress_overview().await;
            Ok::<_, ViewError>(HomeVm::from_overview(&overview))
        }
    });

    let dispatch_intent = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |intent: HomeIntent| {
            let mut confirm_reset = confirm_reset;
            let mut notice = notice;
            let mut error = error;
            let mut overview = overview;

            match intent {
                HomeIntent::RequestReset => {
                    notice.set(None);
                    confirm_reset.set(true);
                }
                HomeIntent::CancelReset => confirm_reset.set(false),
                HomeIntent::ConfirmReset => {
                    let quiz_loop = quiz_loop.clone();
                    spawn(async move {
                        match quiz_loop.reset_progress().await {
                            Ok(()) => {
                                error.set(None);
                                notice.set(Some("Progress reset."));
                                overview.restart();
                            }
                            Err(_) => error.set(Some(ViewError::ResetFailed)),
                        }
                        confirm_reset.set(false);
                    });
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<HomeTestHandles>() {
                handles.register(dispatch_intent);
            }
        }
    }

    let start = move |mode: QuizMode| {
        let start = if mode.uses_start_from() {
            StartFrom::parse(&start_input.read())
        } else {
            StartFrom::FIRST
        };
        navigator.push(Route::Quiz { mode, start });
    };

    let menu = match view_state_from_resource(&overview) {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { "Loading..." }
        },
        ViewState::Error(err) => rsx! {
            p { class: "error", "{err.message()}" }
        },
        ViewState::Ready(vm) => rsx! {
            p { class: "overview", "{vm.summary}" }
            div { class: "mode sequential",
                label { r#for: "start-from", "Start from question" }
                input {
                    id: "start-from",
                    r#type: "number",
                    min: "1",
                    max: "{vm.total}",
                    value: "{start_input}",
                    oninput: move |evt| start_input.set(evt.value()),
                }
                button {
                    id: "home-sequential",
                    onclick: move |_| start(QuizMode::Sequential),
                    "Sequential"
                }
            }
            div { class: "mode",
                button {
                    id: "home-random",
                    onclick: move |_| start(QuizMode::Random),
                    "Random"
                }
                button {
                    id: "home-errors",
                    class: if vm.has_errors { "" } else { "muted" },
                    onclick: move |_| start(QuizMode::Errors),
                    "{vm.errors_label}"
                }
            }
        },
    };

    rsx! {
        div { class: "page home",
            h2 { "Choose a mode" }
            {menu}
            div { class: "reset",
                if confirm_reset() {
                    p { "Erase all saved progress? This cannot be undone." }
                    button {
                        id: "home-reset-confirm",
                        class: "danger",
                        onclick: move |_| dispatch_intent.call(HomeIntent::ConfirmReset),
                        "Yes, reset"
                    }
                    button {
                        id: "home-reset-cancel",
                        onclick: move |_| dispatch_intent.call(HomeIntent::CancelReset),
                        "Cancel"
                    }
                } else {
                    button {
                        id: "home-reset",
                        class: "secondary",
                        onclick: move |_| dispatch_intent.call(HomeIntent::RequestReset),
                        "Reset progress"
                    }
                }
            }
            if let Some(text) = notice() {
                p { class: "notice", "{text}" }
            }
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct HomeTestHandles {
    dispatch: Rc<RefCell<Option<Callback<HomeIntent>>>>,
}

#[cfg(test)]
impl HomeTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<HomeIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<HomeIntent> {
        (*self.dispatch.borrow()).expect("home dispatch registered")
    }
}

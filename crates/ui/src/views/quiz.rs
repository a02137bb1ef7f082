use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::{QuizMode, StartFrom};
use services::SessionState;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{PERSIST_WARNING, QuizIntent, QuizVm, StatsVm, format_clock, start_quiz};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

enum Panel {
    Waiting,
    Question {
        vm: QuizVm,
        started_at: DateTime<Utc>,
    },
    Results(StatsVm),
}

impl Panel {
    fn from_state(state: &SessionState) -> Self {
        match state {
            SessionState::InProgress(session) => QuizVm::from_session(session)
                .map_or(Panel::Waiting, |vm| Panel::Question {
                    vm,
                    started_at: session.started_at(),
                }),
            SessionState::Finished(report) => Panel::Results(StatsVm::from_report(report)),
            SessionState::NotStarted => Panel::Waiting,
        }
    }
}

#[component]
pub fn QuizView(mode: QuizMode, start: StartFrom) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let session = use_signal(SessionState::default);
    let error = use_signal(|| None::<ViewError>);
    let persist_failed = use_signal(|| false);

    let loop_for_start = quiz_loop.clone();
    let resource = use_resource(move || {
        let quiz_loop = loop_for_start.clone();
        let mut session = session;
        let mut error = error;
        let mut persist_failed = persist_failed;

        async move {
            session.set(SessionState::NotStarted);
            error.set(None);
            persist_failed.set(false);
            let started = start_quiz(&quiz_loop, mode, start).await?;
            session.set(started);
            Ok::<_, ViewError>(())
        }
    });

    let dispatch_intent = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |intent: QuizIntent| {
            let mut session = session;
            let mut error = error;
            let mut persist_failed = persist_failed;

            match intent {
                QuizIntent::Answer(letter) => {
                    let scored = quiz_loop.answer(&mut session.write(), letter);
                    let feedback = match scored {
                        Ok(Some(feedback)) => feedback,
                        Ok(None) => return,
                        Err(err) => {
                            error.set(Some(err.into()));
                            return;
                        }
                    };
                    persist_failed.set(false);

                    // The session may move on while the write is pending.
                    let quiz_loop = quiz_loop.clone();
                    spawn(async move {
                        let warning = quiz_loop.persist_answer(&feedback).await;
                        if warning.is_some() && session.peek().shows_answer(&feedback) {
                            persist_failed.set(true);
                        }
                    });
                }
                QuizIntent::Next => {
                    persist_failed.set(false);
                    if let Err(err) = quiz_loop.advance(&mut session.write()) {
                        error.set(Some(err.into()));
                    }
                }
                QuizIntent::Finish => {
                    persist_failed.set(false);
                    if let Err(err) = quiz_loop.finish(&mut session.write()) {
                        error.set(Some(err.into()));
                    }
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent);
            }
        }
    }

    let on_again = {
        let mut resource = resource;
        use_callback(move |()| resource.restart())
    };

    let body = match view_state_from_resource(&resource) {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { "Loading..." }
        },
        ViewState::Error(err) => rsx! {
            StartFailed { error: err }
        },
        ViewState::Ready(()) => match Panel::from_state(&session.read()) {
            Panel::Waiting => rsx! {
                p { "Loading..." }
            },
            Panel::Question { vm, started_at } => rsx! {
                QuestionPanel {
                    vm,
                    started_at,
                    persist_failed: persist_failed(),
                    on_intent: dispatch_intent,
                }
            },
            Panel::Results(stats) => rsx! {
                ResultsPanel { stats, on_again }
            },
        },
    };

    rsx! {
        div { class: "page quiz",
            {body}
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }
        }
    }
}

#[component]
fn QuestionPanel(
    vm: QuizVm,
    started_at: DateTime<Utc>,
    persist_failed: bool,
    on_intent: Callback<QuizIntent>,
) -> Element {
    let progress_style = format!("width: {}%", vm.progress_percent);
    let next_label = vm.next_label();

    rsx! {
        div { class: "quiz-header",
            span { class: "mode-badge", "{vm.mode_label}" }
            h2 { "{vm.heading}" }
            QuizTimer { started_at }
        }
        div { class: "progress",
            div { class: "progress-fill", style: "{progress_style}" }
        }
        p { class: "question", "{vm.text}" }
        div { class: "options",
            for option in vm.options.iter().cloned() {
                button {
                    key: "{option.letter}",
                    class: option.state.class(),
                    disabled: option.state.is_disabled(),
                    onclick: move |_| on_intent.call(QuizIntent::Answer(option.letter)),
                    "{option.label}"
                }
            }
        }
        if let Some(feedback) = vm.feedback.clone() {
            p { class: "feedback", "{feedback}" }
        }
        if persist_failed {
            p { class: "warning", "{PERSIST_WARNING}" }
        }
        div { class: "actions",
            button {
                id: "quiz-next",
                disabled: !vm.answered,
                onclick: move |_| on_intent.call(QuizIntent::Next),
                "{next_label}"
            }
            button {
                id: "quiz-finish",
                class: "secondary",
                onclick: move |_| on_intent.call(QuizIntent::Finish),
                "Finish"
            }
        }
    }
}

/// Ticks once a second while mounted; unmounting drops the tick task.
#[component]
fn QuizTimer(started_at: DateTime<Utc>) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();
    let initial = quiz_loop.elapsed_since(started_at);
    let elapsed = use_signal(move || initial);

    use_future(move || {
        let quiz_loop = quiz_loop.clone();
        let mut elapsed = elapsed;
        async move {
            loop {
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                elapsed.set(quiz_loop.elapsed_since(started_at));
            }
        }
    });

    let text = format_clock(elapsed());
    rsx! {
        span { class: "timer", "Time: {text}" }
    }
}

#[component]
fn ResultsPanel(stats: StatsVm, on_again: Callback<()>) -> Element {
    rsx! {
        div { class: "results",
            h2 { "Results" }
            ul {
                li { "Correct: {stats.correct}" }
                li { "Incorrect: {stats.incorrect}" }
                li { "Time: {stats.time}" }
                li { "Score: {stats.percent}" }
            }
            div { class: "actions",
                button {
                    id: "quiz-again",
                    onclick: move |_| on_again.call(()),
                    "Play again"
                }
                Link { to: Route::Home {}, "Back to menu" }
            }
        }
    }
}

#[component]
fn StartFailed(error: ViewError) -> Element {
    rsx! {
        div { class: "quiz-error",
            p { class: "error", "{error.message()}" }
            Link { to: Route::Home {}, "Back to menu" }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }
}

use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{AnswerOption, Question, QuizMode, StartFrom};
use quiz_core::time::fixed_now;
use services::{Clock, ProgressService, QuestionStore, QuizLoopService};
use storage::repository::{KeyValueStore, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::{HomeView, QuizView};

use super::home::{HomeIntent, HomeTestHandles};
use super::quiz::QuizTestHandles;
use crate::vm::QuizIntent;

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz(QuizMode, StartFrom),
}

#[derive(Clone, Default)]
struct Handles {
    home: HomeTestHandles,
    quiz: QuizTestHandles,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    handles: Handles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.handles.home.clone());
    use_context_provider(|| props.handles.quiz.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz(mode, start) => rsx! { QuizView { mode, start } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    handles: Handles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Run pending async work until the tree settles.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub async fn quiz(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.quiz.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        self.settle().await;
    }

    pub async fn home(&mut self, intent: HomeIntent) {
        let dispatch = self.handles.home.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        self.settle().await;
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Bank of `count` questions "Q1".."Qn"; `A` is always correct.
pub fn sample_questions(count: usize) -> QuestionStore {
    let questions = (1..=count)
        .map(|n| {
            Question::new(
                format!("Q{n}"),
                vec![
                    AnswerOption::new('A', format!("right {n}")),
                    AnswerOption::new('B', format!("wrong {n}")),
                ],
                'A',
            )
            .expect("valid sample question")
        })
        .collect();
    QuestionStore::from_questions(questions)
}

pub async fn setup_view_harness(view: ViewKind, question_count: usize) -> ViewHarness {
    setup_view_harness_with_storage(view, question_count, Storage::in_memory()).await
}

pub async fn setup_view_harness_with_store(
    view: ViewKind,
    question_count: usize,
    store: Arc<dyn KeyValueStore>,
) -> ViewHarness {
    setup_view_harness_with_storage(view, question_count, Storage { progress: store }).await
}

async fn setup_view_harness_with_storage(
    view: ViewKind,
    question_count: usize,
    storage: Storage,
) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let progress = ProgressService::new(Arc::clone(&storage.progress));
    let quiz_loop = Arc::new(QuizLoopService::new(
        clock,
        Arc::new(sample_questions(question_count)),
        progress,
    ));
    let handles = Handles::default();

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { quiz_loop }),
            view,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        storage,
        handles,
    }
}

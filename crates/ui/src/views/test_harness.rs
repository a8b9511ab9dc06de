use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{QuizLoopService, Randomness};
use storage::{ProgressStore, Storage};
use vocab_core::model::{Catalog, WordEntry};

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{ProgressView, QuizView};

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn word_list_label(&self) -> String {
        "Test words".to_string()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz,
    Progress,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: QuizTestHandles,
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
    use_context_provider(|| props.quiz_handles.clone());
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
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Progress => rsx! { ProgressView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub progress: ProgressStore,
    pub quiz_handles: QuizTestHandles,
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

    pub fn drive(&mut self) {
        drive_dom(&mut self.dom);
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

pub fn test_catalog(len: usize) -> Arc<Catalog> {
    let pairs = [
        ("apple", "elma"),
        ("house", "ev"),
        ("water", "su"),
        ("book", "kitap"),
        ("tree", "ağaç"),
        ("door", "kapı"),
    ];
    Arc::new(Catalog::new(
        pairs
            .iter()
            .take(len)
            .map(|(foreign, native)| WordEntry::new(*foreign, *native).expect("valid word"))
            .collect(),
    ))
}

pub fn setup_view_harness(view: ViewKind, catalog: Arc<Catalog>) -> ViewHarness {
    setup_view_harness_with_progress(view, catalog, Storage::in_memory().progress())
}

pub fn setup_view_harness_with_progress(
    view: ViewKind,
    catalog: Arc<Catalog>,
    progress: ProgressStore,
) -> ViewHarness {
    let quiz_loop = Arc::new(
        QuizLoopService::new(catalog, progress.clone()).with_randomness(Randomness::Seeded(42)),
    );
    let quiz_handles = QuizTestHandles::default();
    let app = Arc::new(TestApp { quiz_loop });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        progress,
        quiz_handles,
    }
}

use std::collections::BTreeMap;
use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use quiz_core::model::{FinalProfile, PartKey, PartResult, QuizCatalog, QuizSession};
use services::{QuizFlowService, ScoringBackend, SyncError};

use crate::context::{UiApp, build_app_context};
use crate::views::state::provide_toasts;
use crate::views::{MenuView, ProfileView, QuizView};

/// Backend stub for render-only tests; never reached during SSR.
struct NullBackend;

#[async_trait::async_trait]
impl ScoringBackend for NullBackend {
    async fn submit_part(
        &self,
        _part: &PartKey,
        _answers: &[String],
    ) -> Result<PartResult, SyncError> {
        Ok(PartResult::default())
    }

    async fn final_profile(
        &self,
        _answers_by_part: &BTreeMap<PartKey, Vec<String>>,
    ) -> Result<FinalProfile, SyncError> {
        Ok(FinalProfile::default())
    }
}

struct TestApp {
    catalog: Option<Arc<QuizCatalog>>,
    flow: QuizFlowService,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Option<Arc<QuizCatalog>> {
        self.catalog.clone()
    }

    fn quiz_flow(&self) -> QuizFlowService {
        self.flow.clone()
    }
}

#[derive(Clone, PartialEq)]
pub enum ViewKind {
    Menu,
    Quiz(String),
    Profile,
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    session: QuizSession,
    profile: Option<FinalProfile>,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HarnessProps {}

#[component]
fn ViewRouterHarness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    provide_toasts();
    let session = props.session.clone();
    use_context_provider(|| Signal::new(session));
    let profile = props.profile.clone();
    use_context_provider(|| Signal::new(profile));
    use_context_provider(|| props.view.clone());
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
        ViewKind::Menu => rsx! { MenuView {} },
        ViewKind::Quiz(part_key) => rsx! { QuizView { part_key } },
        ViewKind::Profile => rsx! { ProfileView {} },
    }
}

pub struct ViewHarness {
    dom: VirtualDom,
}

impl ViewHarness {
    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn setup_view_harness(
    view: ViewKind,
    catalog: Option<Arc<QuizCatalog>>,
    session: QuizSession,
    profile: Option<FinalProfile>,
) -> ViewHarness {
    let flow = QuizFlowService::new(Arc::new(NullBackend));
    let app = Arc::new(TestApp { catalog, flow });
    let mut dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        HarnessProps {
            app,
            view,
            session,
            profile,
        },
    );
    dom.rebuild_in_place();
    ViewHarness { dom }
}

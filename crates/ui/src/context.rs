use std::sync::Arc;

use quiz_core::model::QuizCatalog;
use services::QuizFlowService;

/// What the composition root hands to the UI: the (possibly absent) quiz
/// catalog and the flow service wired to a scoring backend.
pub trait UiApp: Send + Sync {
    /// `None` when the catalog failed to load; the UI degrades to a
    /// "no quiz available" screen instead of crashing.
    fn catalog(&self) -> Option<Arc<QuizCatalog>>;

    fn quiz_flow(&self) -> QuizFlowService;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Option<Arc<QuizCatalog>>,
    quiz_flow: QuizFlowService,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            quiz_flow: app.quiz_flow(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Option<Arc<QuizCatalog>> {
        self.catalog.clone()
    }

    #[must_use]
    pub fn quiz_flow(&self) -> QuizFlowService {
        self.quiz_flow.clone()
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

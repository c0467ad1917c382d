use std::sync::Arc;

use checklist_core::model::Catalog;
use services::{ChecklistSession, ReportService, SessionSettings};

pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<Catalog>;
    fn session_settings(&self) -> SessionSettings;

    fn report_service(&self) -> Arc<ReportService>;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<Catalog>,
    session_settings: SessionSettings,

    report_service: Arc<ReportService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            session_settings: app.session_settings(),
            report_service: app.report_service(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn session_settings(&self) -> SessionSettings {
        self.session_settings
    }

    #[must_use]
    pub fn report_service(&self) -> Arc<ReportService> {
        Arc::clone(&self.report_service)
    }

    /// Fresh session for one window. Sessions never share answers.
    #[must_use]
    pub fn new_session(&self) -> ChecklistSession {
        ChecklistSession::new(self.catalog(), self.session_settings)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

use dioxus::prelude::*;

use checklist_core::model::Report;
use services::{ChecklistSession, Finalized, SessionError};

use crate::context::AppContext;
use crate::vm::{ExportStatusVm, ReportVm, map_report};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unanswered { missing: usize },
    NotOnLastPage,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn from_session(err: &SessionError) -> Self {
        match err {
            SessionError::Unanswered { missing } => Self::Unanswered { missing: *missing },
            SessionError::NotOnLastPage => Self::NotOnLastPage,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ViewError::Unanswered { missing: 1 } => {
                "Please answer the remaining question on this page.".to_owned()
            }
            ViewError::Unanswered { missing } => {
                format!("Please answer the {missing} remaining questions on this page.")
            }
            ViewError::NotOnLastPage => "Finish the pages of this group first.".to_owned(),
            ViewError::Unknown => "Something went wrong. Please try again.".to_owned(),
        }
    }
}

/// Last finalize result, kept so the export can be retried.
#[derive(Debug)]
pub struct ReportState {
    pub report: Report,
    pub vm: ReportVm,
}

impl ReportState {
    #[must_use]
    pub fn from_finalized(finalized: &Finalized) -> Self {
        Self {
            report: finalized.report.clone(),
            vm: map_report(&finalized.report, &finalized.export),
        }
    }

    pub fn set_export(&mut self, status: ExportStatusVm) {
        self.vm.export = status;
    }
}

/// Per-window checklist state shared by the sidebar and pages.
#[derive(Clone, Copy)]
pub struct ChecklistState {
    pub session: Signal<ChecklistSession>,
    pub last_report: Signal<Option<ReportState>>,
}

impl ChecklistState {
    #[must_use]
    pub fn new(session: ChecklistSession, last_report: Option<ReportState>) -> Self {
        Self {
            session: Signal::new(session),
            last_report: Signal::new(last_report),
        }
    }
}

/// Create this window's session and expose it to child components.
pub fn use_checklist_state_provider() -> ChecklistState {
    let ctx = use_context::<AppContext>();
    use_context_provider(|| ChecklistState::new(ctx.new_session(), None))
}

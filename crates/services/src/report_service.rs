use std::sync::Arc;

use checklist_core::Clock;
use checklist_core::model::{AnswerStore, Report, ReportStatus};
use storage::{ExportSink, SavedExport};
use tracing::{info, warn};

use crate::error::SessionError;
use crate::export::{ExportFormat, export_report};
use crate::sessions::ChecklistSession;

/// Outcome of a finalize action.
///
/// The report is always available once finalizing is allowed; the export may
/// still fail independently and can be retried with [`ReportService::export`].
#[derive(Debug)]
pub struct Finalized {
    pub report: Report,
    pub export: Result<SavedExport, SessionError>,
}

/// Compiles session answers into a report and hands the export to a sink.
#[derive(Clone)]
pub struct ReportService {
    clock: Clock,
    exports: Arc<dyn ExportSink>,
    format: ExportFormat,
}

impl ReportService {
    #[must_use]
    pub fn new(clock: Clock, exports: Arc<dyn ExportSink>) -> Self {
        Self {
            clock,
            exports,
            format: ExportFormat::default(),
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Compile the session's answers and export them.
    ///
    /// Session state is only read, so a failed export leaves answers and the
    /// cursor untouched.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotOnLastPage` or `SessionError::Unanswered` when
    /// the session cannot be finalized from its current page.
    pub fn finalize(&self, session: &ChecklistSession) -> Result<Finalized, SessionError> {
        session.ensure_can_finalize()?;
        let finalized = self.finalize_answers(session.answers());
        info!(
            session_id = %session.id(),
            total = finalized.report.total(),
            negatives = finalized.report.negative_count(),
            exported = finalized.export.is_ok(),
            "checklist finalized"
        );
        Ok(finalized)
    }

    /// Compile and export an answer store without any page gating.
    #[must_use]
    pub fn finalize_answers(&self, answers: &AnswerStore) -> Finalized {
        let report = self.compile(answers);
        let export = self.export(&report);
        Finalized { report, export }
    }

    #[must_use]
    pub fn compile(&self, answers: &AnswerStore) -> Report {
        let report = Report::from_store(answers, self.clock.now());
        if let ReportStatus::HasNegatives { count } = report.status() {
            info!(count, "report has questions answered No");
        }
        report
    }

    /// Encode every record of `report` and save it through the sink.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Serialization` if encoding fails and
    /// `SessionError::Storage` if the sink cannot save the artifact.
    pub fn export(&self, report: &Report) -> Result<SavedExport, SessionError> {
        let result = export_report(report, self.format)
            .map_err(SessionError::from)
            .and_then(|artifact| self.exports.save(&artifact).map_err(SessionError::from));

        match &result {
            Ok(saved) => info!(
                format = %self.format,
                rows = report.total(),
                location = %saved.location,
                bytes = saved.bytes_written,
                "report exported"
            ),
            Err(err) => warn!(format = %self.format, error = %err, "report export failed"),
        }
        result
    }
}

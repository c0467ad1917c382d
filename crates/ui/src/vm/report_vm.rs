use checklist_core::model::Report;
use services::SessionError;
use storage::SavedExport;

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportStatusVm {
    Saved { location: String, bytes: usize },
    Failed { message: String },
}

impl ExportStatusVm {
    #[must_use]
    pub fn from_result(result: &Result<SavedExport, SessionError>) -> Self {
        match result {
            Ok(saved) => Self::Saved {
                location: saved.location.clone(),
                bytes: saved.bytes_written,
            },
            Err(err) => Self::Failed {
                message: format!("Export failed: {err}"),
            },
        }
    }
}

/// One row of the "answered No" table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NegativeRowVm {
    pub group: String,
    pub subgroup: String,
    pub question: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportVm {
    pub all_yes: bool,
    pub negatives: Vec<NegativeRowVm>,
    pub total: usize,
    pub compiled_at_str: String,
    pub export: ExportStatusVm,
}

#[must_use]
pub fn map_report(report: &Report, export: &Result<SavedExport, SessionError>) -> ReportVm {
    let negatives: Vec<NegativeRowVm> = report
        .negatives()
        .into_iter()
        .map(|record| NegativeRowVm {
            group: record.group.clone(),
            subgroup: record.subgroup.clone(),
            question: record.question.clone(),
        })
        .collect();

    ReportVm {
        all_yes: negatives.is_empty(),
        negatives,
        total: report.total(),
        compiled_at_str: format_datetime(report.compiled_at()),
        export: ExportStatusVm::from_result(export),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checklist_core::model::{Answer, AnswerStore};
    use checklist_core::time::fixed_now;
    use storage::StorageError;

    fn saved() -> Result<SavedExport, SessionError> {
        Ok(SavedExport {
            location: "exports/respostas_cx.xlsx".into(),
            bytes_written: 10,
        })
    }

    #[test]
    fn negatives_become_rows() {
        let mut store = AnswerStore::new();
        store.record("G", "S", "Q1", Answer::Yes);
        store.record("G", "S", "Q2", Answer::No);
        let vm = map_report(&Report::from_store(&store, fixed_now()), &saved());

        assert!(!vm.all_yes);
        assert_eq!(vm.total, 2);
        assert_eq!(
            vm.negatives,
            vec![NegativeRowVm {
                group: "G".into(),
                subgroup: "S".into(),
                question: "Q2".into(),
            }]
        );
        assert_eq!(vm.compiled_at_str, "2023-11-14 22:13 UTC");
    }

    #[test]
    fn failed_export_carries_message() {
        let report = Report::from_store(&AnswerStore::new(), fixed_now());
        let err = Err(SessionError::Storage(StorageError::Unavailable("disk full".into())));
        let vm = map_report(&report, &err);

        assert!(vm.all_yes);
        match vm.export {
            ExportStatusVm::Failed { message } => assert!(message.contains("disk full")),
            ExportStatusVm::Saved { .. } => panic!("expected failure"),
        }
    }
}

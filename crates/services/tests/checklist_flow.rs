use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use checklist_core::model::{
    Answer, AnswerStore, Catalog, Group, REPORT_HEADER, ReportStatus, Subgroup,
};
use checklist_core::time::fixed_clock;
use services::export::SHEET_NAME;
use services::{
    ChecklistSession, ExportFormat, ExportTable, ReportService, SessionError, SessionSettings,
};
use storage::{ExportArtifact, ExportSink, SavedExport, Storage, StorageError};

fn page(name: &str, questions: &[&str]) -> Subgroup {
    Subgroup::new(name, questions.iter().map(|q| (*q).to_owned()).collect())
}

fn scenario_catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::new(vec![
            Group::new("Purpose", vec![page("Intro", &["Q1", "Q2"])]),
            Group::new(
                "Ease",
                vec![page("Progress", &["Q3"]), page("Wording", &["Q4", "Q5"])],
            ),
        ])
        .unwrap(),
    )
}

fn csv_rows(bytes: &[u8]) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_reader(bytes);
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        REPORT_HEADER
    );
    reader.records().map(Result::unwrap).collect()
}

#[test]
fn scenario_a_single_no_is_reported() {
    let (storage, sink) = Storage::in_memory();
    let service = ReportService::new(fixed_clock(), storage.exports).with_format(ExportFormat::Csv);
    let mut session = ChecklistSession::new(scenario_catalog(), SessionSettings::default());

    session.record("Purpose", "Intro", "Q1", Answer::Yes);
    session.record("Purpose", "Intro", "Q2", Answer::No);
    assert!(session.can_finalize());

    let finalized = service.finalize(&session).unwrap();
    let report = &finalized.report;
    assert_eq!(report.status(), ReportStatus::HasNegatives { count: 1 });

    let negatives = report.negatives();
    assert_eq!(negatives.len(), 1);
    assert_eq!(
        (
            negatives[0].group.as_str(),
            negatives[0].subgroup.as_str(),
            negatives[0].question.as_str()
        ),
        ("Purpose", "Intro", "Q2")
    );

    finalized.export.unwrap();
    let saved = sink.saved().unwrap();
    assert_eq!(csv_rows(&saved[0].bytes).len(), 2);
}

// Sessions prefill or block finalize, so an empty store is only reachable here.
#[test]
fn scenario_b_no_answers_exports_header_only() {
    let (storage, sink) = Storage::in_memory();
    let service = ReportService::new(fixed_clock(), storage.exports).with_format(ExportFormat::Csv);

    let finalized = service.finalize_answers(&AnswerStore::new());

    assert_eq!(finalized.report.status(), ReportStatus::AllYes);
    assert!(finalized.report.negatives().is_empty());
    finalized.export.unwrap();
    assert!(csv_rows(&sink.saved().unwrap()[0].bytes).is_empty());
}

fn xlsx_rows(bytes: &[u8]) -> Vec<Vec<String>> {
    use calamine::{Reader, Xlsx, open_workbook_from_rs};

    let mut workbook: Xlsx<_> = open_workbook_from_rs(std::io::Cursor::new(bytes.to_vec())).unwrap();
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_owned()]);
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();
    assert_eq!(rows[0], REPORT_HEADER);
    rows
}

#[test]
fn scenario_a_default_xlsx_export_has_one_row_per_answer() {
    let (storage, sink) = Storage::in_memory();
    let service = ReportService::new(fixed_clock(), storage.exports);
    let mut session = ChecklistSession::new(scenario_catalog(), SessionSettings::default());
    session.answer_current("Q2", Answer::No).unwrap();

    service.finalize(&session).unwrap().export.unwrap();

    let saved = sink.saved().unwrap();
    assert_eq!(saved[0].file_name, "respostas_cx.xlsx");
    let rows = xlsx_rows(&saved[0].bytes);
    assert_eq!(rows.len() - 1, session.snapshot().len());
    assert_eq!(
        rows[1..],
        [
            ["Purpose", "Intro", "Q1", "Yes"],
            ["Purpose", "Intro", "Q2", "No"],
        ]
    );
}

// Sessions prefill or block finalize, so an empty store is only reachable here.
#[test]
fn scenario_b_default_xlsx_export_is_header_only() {
    let (storage, sink) = Storage::in_memory();
    let service = ReportService::new(fixed_clock(), storage.exports);

    service.finalize_answers(&AnswerStore::new()).export.unwrap();

    let rows = xlsx_rows(&sink.saved().unwrap()[0].bytes);
    assert_eq!(rows.len(), 1);
}

#[test]
fn scenario_c_group_switch_resets_page() {
    let mut session = ChecklistSession::new(scenario_catalog(), SessionSettings::default());
    session.select_group("Ease").unwrap();
    assert!(session.next().unwrap());
    assert_eq!(session.page_index(), 1);

    session.select_group("Purpose").unwrap();
    session.select_group("Ease").unwrap();
    assert_eq!(session.page_index(), 0);
}

#[test]
fn scenario_d_next_on_last_page_is_noop() {
    let mut session = ChecklistSession::new(scenario_catalog(), SessionSettings::default());
    session.select_group("Ease").unwrap();
    session.next().unwrap();
    let before = session.cursor();

    assert!(!session.next().unwrap());
    assert_eq!(session.cursor(), before);
    assert!(session.can_finalize());
    assert!(!session.can_next());
}

#[test]
fn catalog_is_unchanged_by_session_activity() {
    let catalog = scenario_catalog();
    let groups_before: Vec<String> = catalog.groups().into_iter().map(str::to_owned).collect();
    let ease_before = catalog.subgroups_of("Ease").unwrap().to_vec();

    let mut session = ChecklistSession::new(Arc::clone(&catalog), SessionSettings::default());
    for _ in 0..3 {
        session.select_group("Ease").unwrap();
        session.next().unwrap();
        session.answer_current("Q4", Answer::No).unwrap();
        session.previous();
        session.record("Ease", "Invented", "Not in catalog", Answer::Yes);
    }

    let groups_after: Vec<String> = catalog.groups().into_iter().map(str::to_owned).collect();
    assert_eq!(groups_before, groups_after);
    assert_eq!(ease_before, catalog.subgroups_of("Ease").unwrap());
}

#[test]
fn cursor_stays_in_bounds_through_a_long_walk() {
    let mut session = ChecklistSession::new(scenario_catalog(), SessionSettings::default());
    let groups = ["Purpose", "Ease"];
    for step in 0..200_usize {
        match step % 5 {
            0 | 3 => {
                session.next().unwrap();
            }
            1 => {
                session.previous();
            }
            2 => session.select_group(groups[step % 2]).unwrap(),
            _ => {
                session.next().unwrap();
                session.next().unwrap();
            }
        }
        assert!(session.page_index() < session.page_count());
    }
}

#[test]
fn export_rows_match_snapshot_size() {
    let service = ReportService::new(fixed_clock(), Storage::in_memory().0.exports);
    let mut session = ChecklistSession::new(scenario_catalog(), SessionSettings::default());
    session.select_group("Ease").unwrap();
    session.next().unwrap();
    session.answer_current("Q5", Answer::No).unwrap();
    session.answer_current("Q5", Answer::Yes).unwrap();

    let finalized = service.finalize(&session).unwrap();
    let table = ExportTable::from_report(&finalized.report);

    assert_eq!(table.row_count(), session.snapshot().len());
    // Purpose/Intro (2) + Ease/Progress (1) + Ease/Wording (2), in visit order.
    let questions: Vec<&str> = table.rows().iter().map(|r| r[2].as_str()).collect();
    assert_eq!(questions, vec!["Q1", "Q2", "Q3", "Q4", "Q5"]);
}

#[test]
fn warning_table_holds_exactly_the_no_answers() {
    let service = ReportService::new(fixed_clock(), Storage::in_memory().0.exports);
    let mut answers = AnswerStore::new();
    answers.record("Purpose", "Intro", "Q1", Answer::No);
    answers.record("Purpose", "Intro", "Q2", Answer::Yes);
    answers.record("Ease", "Wording", "Q4", Answer::No);
    answers.record("Ease", "Wording", "Q4", Answer::Yes);

    let report = service.compile(&answers);
    let flagged: Vec<&str> = report
        .negatives()
        .iter()
        .map(|r| r.question.as_str())
        .collect();
    assert_eq!(flagged, vec!["Q1"]);
    assert!(report.negatives().iter().all(|r| r.answer == Answer::No));
}

#[test]
fn finalize_is_refused_before_the_last_page() {
    let service = ReportService::new(fixed_clock(), Storage::in_memory().0.exports);
    let mut session = ChecklistSession::new(scenario_catalog(), SessionSettings::default());
    session.select_group("Ease").unwrap();

    let err = service.finalize(&session).unwrap_err();
    assert!(matches!(err, SessionError::NotOnLastPage));
}

#[test]
fn finalize_does_not_require_visiting_other_groups() {
    let service = ReportService::new(fixed_clock(), Storage::in_memory().0.exports);
    let session = ChecklistSession::new(scenario_catalog(), SessionSettings::default());

    let finalized = service.finalize(&session).unwrap();
    assert_eq!(finalized.report.total(), 2);
}

/// Fails the first save, then succeeds.
struct FlakySink {
    failed_once: AtomicBool,
}

impl ExportSink for FlakySink {
    fn save(&self, artifact: &ExportArtifact) -> Result<SavedExport, StorageError> {
        if !self.failed_once.swap(true, Ordering::SeqCst) {
            return Err(StorageError::Unavailable("disk full".into()));
        }
        Ok(SavedExport {
            location: artifact.file_name.clone(),
            bytes_written: artifact.bytes.len(),
        })
    }
}

#[test]
fn failed_export_keeps_session_and_can_be_retried() {
    let sink = Arc::new(FlakySink {
        failed_once: AtomicBool::new(false),
    });
    let service = ReportService::new(fixed_clock(), sink);
    let mut session = ChecklistSession::new(scenario_catalog(), SessionSettings::default());
    session.answer_current("Q2", Answer::No).unwrap();
    let cursor = session.cursor();
    let answers = session.snapshot();

    let finalized = service.finalize(&session).unwrap();
    assert!(matches!(finalized.export, Err(SessionError::Storage(_))));
    assert_eq!(session.cursor(), cursor);
    assert_eq!(session.snapshot(), answers);

    let saved = service.export(&finalized.report).unwrap();
    assert_eq!(saved.location, "respostas_cx.xlsx");

    let again = service.finalize(&session).unwrap();
    assert!(again.export.is_ok());
}

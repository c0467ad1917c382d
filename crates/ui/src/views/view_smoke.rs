use services::SessionSettings;

use super::test_harness::{SessionSetup, ViewKind, setup_view_harness, setup_view_harness_with};

#[test]
fn checklist_view_smoke_renders_first_page() {
    let mut harness = setup_view_harness(ViewKind::Checklist);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("CX Survey Quality Checklist"), "missing title in {html}");
    assert!(html.contains("Purpose: Assess suitability"), "missing group in {html}");
    assert!(
        html.contains("1. Confirm that you need the survey"),
        "missing subgroup in {html}"
    );
    assert!(
        html.contains("1- Is a CX survey the right tool for your goal?"),
        "missing question in {html}"
    );
    assert!(html.contains("Page 1 of 2"), "missing page label in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
    assert!(!html.contains("Previous"), "unexpected previous button in {html}");
    assert!(!html.contains("Finish and export"), "unexpected finish in {html}");
}

#[test]
fn checklist_view_smoke_prefills_yes_by_default() {
    let mut harness = setup_view_harness(ViewKind::Checklist);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("8 of 44 answered"), "missing progress in {html}");
    assert!(!html.contains("question--unanswered"), "unexpected blank row in {html}");
}

#[test]
fn checklist_view_smoke_strict_mode_leaves_rows_blank() {
    let mut harness = setup_view_harness_with(
        ViewKind::Checklist,
        SessionSetup::Fresh,
        SessionSettings::default().with_require_explicit_answer(true),
    );
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("0 of 44 answered"), "missing progress in {html}");
    assert!(html.contains("question--unanswered"), "missing blank row in {html}");
}

#[test]
fn checklist_view_smoke_last_page_offers_finish() {
    let mut harness = setup_view_harness_with(
        ViewKind::Checklist,
        SessionSetup::LastPageOfFirstGroup,
        SessionSettings::default(),
    );
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Page 2 of 2"), "missing page label in {html}");
    assert!(html.contains("Previous"), "missing previous button in {html}");
    assert!(html.contains("Finish and export"), "missing finish in {html}");
    assert!(!html.contains(">Next<"), "unexpected next button in {html}");
}

#[test]
fn sidebar_smoke_lists_every_group() {
    let mut harness = setup_view_harness(ViewKind::Sidebar);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Choose a group:"), "missing prompt in {html}");
    for group in ["Purpose:", "Ease:", "Governance:"] {
        assert!(html.contains(group), "missing {group} in {html}");
    }
    assert!(html.contains("group-menu"), "missing radio group in {html}");
}

#[test]
fn report_view_smoke_lists_negative_answers() {
    let mut harness = setup_view_harness(ViewKind::Report);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Questions answered No:"), "missing warning in {html}");
    assert!(
        html.contains("9- Does each question ask about just one thing?"),
        "missing negative row in {html}"
    );
    assert!(
        !html.contains("All questions were answered Yes."),
        "unexpected success in {html}"
    );
    assert!(html.contains("memory://respostas_cx.xlsx"), "missing location in {html}");
    assert!(html.contains("Export again"), "missing retry in {html}");
    assert_eq!(harness.sink.saved().unwrap().len(), 1);
}

#[test]
fn report_view_smoke_without_report() {
    let mut harness = setup_view_harness(ViewKind::ReportEmpty);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("No report yet"), "missing empty state in {html}");
    assert!(!html.contains("Export again"), "unexpected retry in {html}");
}

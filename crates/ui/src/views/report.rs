use dioxus::prelude::*;
use dioxus_router::Link;

use checklist_core::model::NEGATIVE_TABLE_HEADER;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ChecklistState;
use crate::vm::{ExportStatusVm, ReportVm};

#[component]
pub fn ReportView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<ChecklistState>();
    let report_service = ctx.report_service();
    let vm = state.last_report.read().as_ref().map(|s| s.vm.clone());

    rsx! {
        div { class: "page report-page",
            header { class: "view-header",
                h2 { class: "view-title", "Results" }
            }
            div { class: "view-divider" }
            match vm {
                None => rsx! {
                    p { "No report yet. Finish a group to compile your answers." }
                },
                Some(vm) => rsx! {
                    ReportDetails { vm }
                    div { class: "nav-buttons",
                        Link { class: "btn btn-secondary", to: Route::Checklist {}, "Back to checklist" }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| {
                                let mut last_report = state.last_report;
                                let mut guard = last_report.write();
                                if let Some(current) = &mut *guard {
                                    let result = report_service.export(&current.report);
                                    current.set_export(ExportStatusVm::from_result(&result));
                                }
                            },
                            "Export again"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ReportDetails(vm: ReportVm) -> Element {
    let rows = vm.negatives.iter().map(|row| {
        rsx! {
            tr {
                td { "{row.group}" }
                td { "{row.subgroup}" }
                td { "{row.question}" }
            }
        }
    });
    let headers = NEGATIVE_TABLE_HEADER.iter().map(|title| rsx! { th { "{title}" } });

    rsx! {
        p { class: "report-meta", "{vm.total} answers compiled at {vm.compiled_at_str}" }
        if vm.all_yes {
            div { class: "alert alert-success", "All questions were answered Yes." }
        } else {
            div { class: "alert alert-warning", "Questions answered No:" }
            table { class: "report-table",
                thead { tr { {headers} } }
                tbody { {rows} }
            }
        }
        match &vm.export {
            ExportStatusVm::Saved { location, bytes } => rsx! {
                p { class: "export-status", "Spreadsheet saved to {location} ({bytes} bytes)." }
            },
            ExportStatusVm::Failed { message } => rsx! {
                p { class: "error", "{message}" }
            },
        }
    }
}

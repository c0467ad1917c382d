use dioxus::prelude::*;
use dioxus_router::use_navigator;

use checklist_core::model::Answer;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ChecklistState, ReportState, ViewError};
use crate::vm::{QuestionVm, map_page};

#[component]
pub fn ChecklistView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<ChecklistState>();
    let navigator = use_navigator();
    let mut error = use_signal(|| None::<ViewError>);

    let page = map_page(&state.session.read());
    let report_service = ctx.report_service();

    let questions = page.questions.iter().cloned().map(|question| {
        rsx! { QuestionRow { key: "{question.index}", question } }
    });

    rsx! {
        div { class: "page checklist-page",
            header { class: "view-header",
                h1 { class: "view-title", "{page.title}" }
                h3 { class: "view-subtitle", "{page.group_name}" }
            }
            div { class: "view-divider" }
            h2 { class: "subgroup-title", "{page.subgroup_name}" }
            p { class: "page-meta", "{page.page_label} · {page.progress_label}" }

            div { class: "questions", {questions} }

            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }

            div { class: "nav-buttons",
                if page.can_previous {
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut session = state.session;
                            session.write().previous();
                            error.set(None);
                        },
                        "Previous"
                    }
                } else {
                    span {}
                }
                if page.can_next {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut session = state.session;
                            let moved = session.write().next();
                            match moved {
                                Ok(_) => error.set(None),
                                Err(err) => error.set(Some(ViewError::from_session(&err))),
                            }
                        },
                        "Next"
                    }
                } else if page.can_finalize {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut last_report = state.last_report;
                            let finalized = report_service.finalize(&state.session.read());
                            match finalized {
                                Ok(finalized) => {
                                    error.set(None);
                                    last_report.set(Some(ReportState::from_finalized(&finalized)));
                                    let _ = navigator.push(Route::Report {});
                                }
                                Err(err) => error.set(Some(ViewError::from_session(&err))),
                            }
                        },
                        "Finish and export"
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionRow(question: QuestionVm) -> Element {
    let state = use_context::<ChecklistState>();
    let name = question.input_name();
    let row_class = if question.answer.is_some() {
        "question"
    } else {
        "question question--unanswered"
    };

    let options = Answer::ALL.into_iter().map(|option| {
        let mut session = state.session;
        let text = question.text.clone();
        let name = name.clone();
        rsx! {
            label { class: "question-option",
                input {
                    r#type: "radio",
                    name: "{name}",
                    checked: question.answer == Some(option),
                    onchange: move |_| {
                        if let Err(err) = session.write().answer_current(&text, option) {
                            tracing::warn!(error = %err, "answer rejected");
                        }
                    },
                }
                span { "{option.label()}" }
            }
        }
    });

    rsx! {
        div { class: row_class,
            p { class: "question-text", "{question.text}" }
            div { class: "question-options", {options} }
        }
    }
}

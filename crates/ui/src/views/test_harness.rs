use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use checklist_core::model::{Answer, Catalog};
use checklist_core::time::fixed_clock;
use services::{ChecklistSession, ReportService, SessionSettings};
use storage::{InMemoryExportSink, Storage};

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::{ChecklistState, ChecklistView, ReportState, ReportView, Sidebar};

#[derive(Clone)]
struct TestApp {
    catalog: Arc<Catalog>,
    settings: SessionSettings,
    report_service: Arc<ReportService>,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    fn session_settings(&self) -> SessionSettings {
        self.settings
    }

    fn report_service(&self) -> Arc<ReportService> {
        Arc::clone(&self.report_service)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Checklist,
    Sidebar,
    /// Report page after finalizing the first group with one answer set to No.
    Report,
    /// Report page before anything was finalized.
    ReportEmpty,
}

/// How the session is prepared before the first render.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SessionSetup {
    Fresh,
    LastPageOfFirstGroup,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    setup: SessionSetup,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| prepare_state(&ctx, props.view, props.setup));
    rsx! { Router::<TestRoute> {} }
}

fn prepare_state(ctx: &AppContext, view: ViewKind, setup: SessionSetup) -> ChecklistState {
    let mut session = ctx.new_session();
    if setup == SessionSetup::LastPageOfFirstGroup || view == ViewKind::Report {
        advance_to_last_page(&mut session);
    }

    let last_report = match view {
        ViewKind::Report => {
            let first = session.current_subgroup().questions()[0].clone();
            session
                .answer_current(&first, Answer::No)
                .expect("answer first question");
            let finalized = ctx
                .report_service()
                .finalize(&session)
                .expect("finalize from last page");
            Some(ReportState::from_finalized(&finalized))
        }
        _ => None,
    };
    ChecklistState::new(session, last_report)
}

fn advance_to_last_page(session: &mut ChecklistSession) {
    while session.next().expect("advance page") {}
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
        ViewKind::Checklist => rsx! { ChecklistView {} },
        ViewKind::Sidebar => rsx! { Sidebar {} },
        ViewKind::Report | ViewKind::ReportEmpty => rsx! { ReportView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub sink: InMemoryExportSink,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with(view, SessionSetup::Fresh, SessionSettings::default())
}

pub fn setup_view_harness_with(
    view: ViewKind,
    setup: SessionSetup,
    settings: SessionSettings,
) -> ViewHarness {
    let (storage, sink) = Storage::in_memory();
    let report_service = Arc::new(ReportService::new(fixed_clock(), storage.exports));
    let app = Arc::new(TestApp {
        catalog: Arc::new(Catalog::builtin().expect("builtin catalog")),
        settings,
        report_service,
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view, setup });

    ViewHarness { dom, sink }
}

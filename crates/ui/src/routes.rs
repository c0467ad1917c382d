use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{ChecklistView, ReportView, Sidebar, use_checklist_state_provider};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ChecklistView)] Checklist {},
        #[route("/report", ReportView)] Report {},
}

/// Owns the window's checklist session for every page below it.
#[component]
fn Layout() -> Element {
    use_checklist_state_provider();

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

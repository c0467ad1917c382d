use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::routes::Route;
use crate::views::ChecklistState;
use crate::vm::map_group_menu;

/// Group menu. Picking a group always opens its first page.
#[component]
pub fn Sidebar() -> Element {
    let state = use_context::<ChecklistState>();
    let navigator = use_navigator();
    let items = map_group_menu(&state.session.read());

    let entries = items.into_iter().map(|item| {
        let nav = navigator;
        let mut session = state.session;
        let name = item.name.clone();
        rsx! {
            label { class: "sidebar-group",
                input {
                    r#type: "radio",
                    name: "group-menu",
                    checked: item.selected,
                    onchange: move |_| {
                        if let Err(err) = session.write().select_group(&name) {
                            tracing::warn!(error = %err, "group selection rejected");
                        }
                        let _ = nav.push(Route::Checklist {});
                    },
                }
                span { "{item.name}" }
                span { class: "sidebar-group-progress", "{item.progress_label}" }
            }
        }
    });

    rsx! {
        nav { class: "sidebar",
            h2 { "Menu" }
            p { "Choose a group:" }
            {entries}
        }
    }
}

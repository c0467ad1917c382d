mod checklist;
mod report;
mod sidebar;
mod state;

pub use checklist::ChecklistView;
pub use report::ReportView;
pub use sidebar::Sidebar;
pub use state::{ChecklistState, ReportState, ViewError, use_checklist_state_provider};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

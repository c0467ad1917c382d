mod checklist_vm;
mod report_vm;
mod time_fmt;

pub use checklist_vm::{
    GroupMenuItemVm, PageVm, QuestionVm, map_group_menu, map_page,
};
pub use report_vm::{ExportStatusVm, NegativeRowVm, ReportVm, map_report};
pub use time_fmt::format_datetime;

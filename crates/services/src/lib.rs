#![forbid(unsafe_code)]

pub mod error;
pub mod export;
pub mod report_service;
pub mod sessions;

pub use checklist_core::Clock;

pub use error::{SerializationError, SessionError};
pub use export::{ExportFormat, ExportTable};
pub use report_service::{Finalized, ReportService};
pub use sessions::{ChecklistProgress, ChecklistSession, GroupProgress, SessionSettings};

mod answer;
mod answer_store;
mod catalog;
mod ids;
mod report;

pub use answer::{Answer, AnswerKey};
pub use answer_store::AnswerStore;
pub use catalog::{Catalog, CatalogError, Group, Subgroup};
pub use ids::SessionId;
pub use report::{NEGATIVE_TABLE_HEADER, REPORT_HEADER, Report, ReportRecord, ReportStatus};

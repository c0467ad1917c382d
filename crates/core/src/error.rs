use thiserror::Error;

/// Lookup failures against the checklist catalog.
///
/// Raised for unknown group names, out-of-range page indices and questions
/// that are not on the page being answered. Callers are expected to only
/// offer valid choices, so these are never clamped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundError {
    #[error("unknown group: {name:?}")]
    Group { name: String },

    #[error("group {group:?} has no page {index}")]
    Page { group: String, index: usize },

    #[error("page {subgroup:?} has no question {question:?}")]
    Question { subgroup: String, question: String },
}


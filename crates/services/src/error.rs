//! Shared error types for the services crate.

use thiserror::Error;

use checklist_core::NotFoundError;
use storage::StorageError;

/// Errors emitted while encoding an export document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerializationError {
    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("csv encoding failed: {0}")]
    Csv(String),
    #[error("too many rows for one worksheet: {rows}")]
    TooManyRows { rows: usize },
}

/// Errors emitted by checklist sessions and finalization.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error("{missing} question(s) on this page still need an answer")]
    Unanswered { missing: usize },
    #[error("finalize is only available on the last page of a group")]
    NotOnLastPage,
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

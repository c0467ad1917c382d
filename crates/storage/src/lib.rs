#![forbid(unsafe_code)]

pub mod repository;

pub use repository::{
    ExportArtifact, ExportSink, FsExportSink, InMemoryExportSink, SavedExport, Storage,
    StorageError,
};

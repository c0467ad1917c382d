use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by export sinks.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("artifact file name is not a plain file name: {0:?}")]
    InvalidFileName(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("export sink unavailable: {0}")]
    Unavailable(String),
}

/// A finished, downloadable export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Where a saved artifact ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedExport {
    pub location: String,
    pub bytes_written: usize,
}

/// Destination for finished exports ("download" target).
pub trait ExportSink: Send + Sync {
    /// Save an artifact under its file name, replacing an earlier export of
    /// the same name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the artifact cannot be stored.
    fn save(&self, artifact: &ExportArtifact) -> Result<SavedExport, StorageError>;
}

//
// ─── FILESYSTEM ────────────────────────────────────────────────────────────────
//

/// Writes artifacts into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct FsExportSink {
    dir: PathBuf,
}

impl FsExportSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExportSink for FsExportSink {
    fn save(&self, artifact: &ExportArtifact) -> Result<SavedExport, StorageError> {
        let name = Path::new(&artifact.file_name);
        if artifact.file_name.is_empty() || name.file_name() != Some(name.as_os_str()) {
            return Err(StorageError::InvalidFileName(artifact.file_name.clone()));
        }

        fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;

        // Write next to the target and rename so a failed export never leaves
        // a truncated file under the final name.
        let target = self.dir.join(name);
        let partial = self.dir.join(format!("{}.partial", artifact.file_name));
        let written = write_file(&partial, &artifact.bytes)
            .and_then(|()| fs::rename(&partial, &target).map_err(io_err(&target)));
        if let Err(err) = written {
            // Cleanup failure is ignored; the write error is reported.
            let _ = fs::remove_file(&partial);
            return Err(err);
        }

        Ok(SavedExport {
            location: target.display().to_string(),
            bytes_written: artifact.bytes.len(),
        })
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let mut file = fs::File::create(path).map_err(io_err(path))?;
    file.write_all(bytes).map_err(io_err(path))?;
    file.sync_all().map_err(io_err(path))
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError {
    let path = path.to_path_buf();
    move |source| StorageError::Io { path, source }
}

//
// ─── IN MEMORY ─────────────────────────────────────────────────────────────────
//

/// Keeps every saved artifact in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExportSink {
    saved: Arc<Mutex<Vec<ExportArtifact>>>,
}

impl InMemoryExportSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All artifacts saved so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the buffer lock is poisoned.
    pub fn saved(&self) -> Result<Vec<ExportArtifact>, StorageError> {
        let guard = self
            .saved
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(guard.clone())
    }
}

impl ExportSink for InMemoryExportSink {
    fn save(&self, artifact: &ExportArtifact) -> Result<SavedExport, StorageError> {
        let mut guard = self
            .saved
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        guard.push(artifact.clone());
        Ok(SavedExport {
            location: format!("memory://{}", artifact.file_name),
            bytes_written: artifact.bytes.len(),
        })
    }
}

/// Export sink bundle handed to the services layer.
#[derive(Clone)]
pub struct Storage {
    pub exports: Arc<dyn ExportSink>,
}

impl Storage {
    #[must_use]
    pub fn filesystem(dir: impl Into<PathBuf>) -> Self {
        Self {
            exports: Arc::new(FsExportSink::new(dir)),
        }
    }

    #[must_use]
    pub fn in_memory() -> (Self, InMemoryExportSink) {
        let sink = InMemoryExportSink::new();
        let exports: Arc<dyn ExportSink> = Arc::new(sink.clone());
        (Self { exports }, sink)
    }
}

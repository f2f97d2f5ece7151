//! Story file output.
//!
//! Writes generated story modules to disk, or, in dry-run and check modes,
//! reports what would be written without touching the filesystem.

use crate::error::{CliResult, WriteError};
use std::path::{Path, PathBuf};

/// What the writer does with rendered content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Create directories and overwrite files.
    #[default]
    Write,
    /// Return the content instead of writing it.
    DryRun,
    /// Compare the content with what is on disk.
    Check,
}

/// Result of a write operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written.
    Written {
        /// Path to the written file.
        path: PathBuf,
        /// Number of bytes written.
        bytes: usize,
    },
    /// Dry run: content was not written.
    DryRun {
        /// Content that would have been written.
        content: String,
        /// Path where content would have been written.
        path: PathBuf,
    },
    /// Check: the file on disk matches.
    UpToDate { path: PathBuf },
    /// Check: the file on disk differs.
    Stale { path: PathBuf },
    /// Check: there is no file on disk.
    Missing { path: PathBuf },
}

/// Story file writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileWriter {
    mode: WriteMode,
}

impl FileWriter {
    /// Create a writer in the given mode.
    pub fn new(mode: WriteMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Whether this writer modifies the filesystem.
    pub fn writes(&self) -> bool {
        self.mode == WriteMode::Write
    }

    /// Create `dir` and its parents when writing; no-op otherwise.
    pub fn ensure_dir(&self, dir: &Path) -> CliResult<()> {
        if self.writes() && !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| WriteError::CreateDir {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Emit `content` for `path` according to the writer's mode.
    ///
    /// Existing files are overwritten, never patched.
    pub fn write(&self, path: &Path, content: &str) -> CliResult<WriteResult> {
        match self.mode {
            WriteMode::DryRun => Ok(WriteResult::DryRun {
                content: content.to_string(),
                path: path.to_path_buf(),
            }),
            WriteMode::Check => self.compare(path, content),
            WriteMode::Write => {
                if let Some(parent) = path.parent() {
                    self.ensure_dir(parent)?;
                }

                std::fs::write(path, content).map_err(|e| WriteError::WriteFile {
                    path: path.to_path_buf(),
                    source: e,
                })?;

                tracing::info!(path = %path.display(), bytes = content.len(), "wrote story");
                Ok(WriteResult::Written {
                    path: path.to_path_buf(),
                    bytes: content.len(),
                })
            }
        }
    }

    fn compare(&self, path: &Path, content: &str) -> CliResult<WriteResult> {
        let path_buf = path.to_path_buf();
        if !path.exists() {
            return Ok(WriteResult::Missing { path: path_buf });
        }

        let existing = std::fs::read_to_string(path).map_err(|e| WriteError::ReadExisting {
            path: path_buf.clone(),
            source: e,
        })?;

        if existing.trim_end() == content.trim_end() {
            Ok(WriteResult::UpToDate { path: path_buf })
        } else {
            Ok(WriteResult::Stale { path: path_buf })
        }
    }
}

impl WriteResult {
    /// Get the path associated with this result.
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. }
            | WriteResult::DryRun { path, .. }
            | WriteResult::UpToDate { path }
            | WriteResult::Stale { path }
            | WriteResult::Missing { path } => path,
        }
    }

    /// Check if the file was written.
    pub fn was_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }

    /// Whether a check found the file missing or different.
    pub fn is_out_of_date(&self) -> bool {
        matches!(self, WriteResult::Stale { .. } | WriteResult::Missing { .. })
    }

    /// Get the number of bytes written (0 unless written).
    pub fn bytes(&self) -> usize {
        match self {
            WriteResult::Written { bytes, .. } => *bytes,
            _ => 0,
        }
    }
}

//! Error types for story generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Error while rendering a story module.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Args could not be serialized into the export block.
    #[error("Failed to serialize args for story '{story}': {source}")]
    Serialize {
        story: String,
        #[source]
        source: serde_json::Error,
    },

    /// Relative paths could not be resolved against the current directory.
    #[error("Failed to resolve import path for {path}: {source}")]
    ResolvePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Controls list could not be serialized.
    #[error("Failed to serialize controls for '{component}': {source}")]
    Controls {
        component: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Error loading a sidecar story specification.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The sidecar file does not exist.
    #[error("Story spec not found: {path}")]
    NotFound { path: PathBuf },

    /// The sidecar file exists but could not be read.
    #[error("Failed to read story spec {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sidecar file is not a valid list of story examples.
    #[error("Invalid story spec {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SpecError {
    /// Whether this error only means "no customization was requested".
    pub fn is_not_found(&self) -> bool {
        matches!(self, SpecError::NotFound { .. })
    }

    /// Path of the sidecar file involved.
    pub fn path(&self) -> &std::path::Path {
        match self {
            SpecError::NotFound { path }
            | SpecError::Io { path, .. }
            | SpecError::Parse { path, .. } => path,
        }
    }
}

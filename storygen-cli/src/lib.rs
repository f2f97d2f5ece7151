//! # storygen-cli
//!
//! CLI library for generating Storybook story modules from a tree of Vue
//! components.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`walker`] - Component discovery, sidecar loading and per-entry error handling
//! - [`writer`] - File output, dry-run and check support
//! - [`error`] - Error types and handling
//!
//! Rendering itself lives in the `storygen` crate.

pub mod config;
pub mod error;
pub mod walker;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use walker::{TreeWalker, WalkSummary};
pub use writer::{FileWriter, WriteMode, WriteResult};

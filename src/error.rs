//! Error kinds distinguished by the orchestration layer.
//!
//! Everything else travels as a plain `anyhow::Error` with context attached.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("package '{0}' not found")]
    PackageNotFound(String),

    #[error("package '{0}' is not transient")]
    NotTransient(String),

    #[error("command `{command}` failed with {status}")]
    CommandFailed { command: String, status: String },

    #[error("expected exactly one wheel in {dir:?}, found {count}")]
    MissingArchive { dir: PathBuf, count: usize },

    #[error("{0:?} is not an existing directory")]
    NotADirectory(PathBuf),

    #[error("unexpected output from metadata query: {0}")]
    InvalidQueryOutput(String),
}

//! Error types for build and packaging operations.
//!
//! Every detected problem here is fatal for the whole run: there is no
//! warning tier and no partial output mode. Components return these
//! errors instead of terminating the process; only the CLI boundary
//! turns them into an exit status.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("artifact {file:?} does not embed expected version {version}")]
    QualifierMismatch { file: String, version: String },

    #[error("no artifacts matching {pattern} in {}", .dir.display())]
    NoArtifacts { dir: PathBuf, pattern: String },

    #[error("command failed ({status}): {command}\n{output}")]
    CommandFailed {
        command: String,
        status: i32,
        output: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("glob read error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type for build and packaging operations.
pub type Result<T> = std::result::Result<T, Error>;

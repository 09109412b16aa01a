//! Error types for burpline.
//!
//! Uses `thiserror` for ergonomic error definitions. The taxonomy mirrors
//! the failure categories the CLI reports to the operator: an unreachable
//! endpoint, bad input files, rejected submissions, and failed inquiries.

use std::path::PathBuf;
use thiserror::Error;

use crate::targets::ParseError;

/// Main error type for CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("no scanner API endpoint found on {0}")]
    UnreachableEndpoint(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to read {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("scan submission failed for {0}")]
    Submission(String),

    #[error("inquiry failed: {0}")]
    Inquiry(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

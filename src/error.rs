//! Error type shared by the resolver and the archive transform.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a conversion.
///
/// None of these are retried internally; they travel back to the caller,
/// which decides how to report them.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("no input file given (run with --help for usage)")]
    MissingArgument,

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("'{}' is a directory, only single files are supported", .0.display())]
    InvalidInput(PathBuf),

    #[error("'{}' does not name a file", .0.display())]
    InvalidOutput(PathBuf),

    #[error("failed to {action} '{}'", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is not a valid archive document", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("archive '{}' is missing required fields: {reason}", .path.display())]
    Format { path: PathBuf, reason: String },

    #[error("archive '{}' is malformed: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("failed to serialize archive document")]
    Serialize(#[source] serde_json::Error),

    #[error(
        "archive '{}' declares {expected} bytes but its payload decodes to {actual}",
        .path.display()
    )]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },
}

impl ConvertError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConvertError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ConvertError::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ConvertError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

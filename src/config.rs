//! Explicit settings for one conversion, built once by the entry point.

use std::path::{Path, PathBuf};

use crate::archive::DEFAULT_UTC_OFFSET_HOURS;

/// Settings for a single invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// File to encode, or archive to decode
    pub input: PathBuf,
    /// Explicit output path; derived from the input when absent
    pub output: Option<PathBuf>,
    /// Fixed offset (hours) for archive timestamps
    pub utc_offset_hours: i32,
    /// Fail on `file.size` mismatches instead of warning
    pub strict_size: bool,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            strict_size: false,
        }
    }

    pub fn with_output(mut self, output: Option<impl Into<PathBuf>>) -> Self {
        self.output = output.map(Into::into);
        self
    }

    pub fn with_utc_offset(mut self, hours: i32) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    pub fn with_strict_size(mut self, strict: bool) -> Self {
        self.strict_size = strict;
        self
    }

    pub(crate) fn output_path(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

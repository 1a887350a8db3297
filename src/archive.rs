//! Archive document data structures

use std::path::Path;

use base64::Engine;
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConvertError, Result};

// Archive format constants
pub const ARCHIVE_EXTENSION: &str = "txt";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Offset used for `createdAt` unless configured otherwise (UTC+8).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;

/// The JSON container written by encode and read by decode.
///
/// Field order here is the key order on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveDocument {
    /// Version of the tool that wrote the archive (informational)
    #[serde(default)]
    pub version: String,
    /// Creation time, `YYYY-MM-DD HH:MM:SS`
    #[serde(default)]
    pub created_at: String,
    pub file: ArchivedFile,
}

/// The embedded file record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedFile {
    /// Original base name, extension included
    #[serde(default)]
    pub name: String,
    /// Original extension with its leading dot, or empty
    #[serde(default)]
    pub extension: String,
    /// Original length in bytes
    #[serde(default)]
    pub size: u64,
    /// File bytes, standard base64 with padding
    pub base64: String,
}

impl ArchiveDocument {
    /// Build a document around `data`, stamped with the current time.
    pub fn new(name: impl Into<String>, data: &[u8], utc_offset_hours: i32) -> Self {
        Self::with_timestamp(name, data, timestamp_now(utc_offset_hours))
    }

    /// Build a document with an explicit `createdAt` value
    pub fn with_timestamp(name: impl Into<String>, data: &[u8], created_at: String) -> Self {
        let name = name.into();
        let extension = extension_of(&name);

        Self {
            version: VERSION.to_string(),
            created_at,
            file: ArchivedFile {
                name,
                extension,
                size: data.len() as u64,
                base64: base64::engine::general_purpose::STANDARD.encode(data),
            },
        }
    }

    /// Serialize as indented JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(ConvertError::Serialize)
    }

    /// Parse archive text read from `source`.
    ///
    /// Syntax errors become [`ConvertError::Parse`]; a document without a
    /// `file` object or a `file.base64` string becomes [`ConvertError::Format`],
    /// and fields of the wrong type become [`ConvertError::Malformed`].
    pub fn parse(bytes: &[u8], source: &Path) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| ConvertError::Parse {
            path: source.to_path_buf(),
            source: e,
        })?;

        let file = value
            .get("file")
            .filter(|f| f.is_object())
            .ok_or_else(|| ConvertError::format(source, "file"))?;
        if !file.get("base64").is_some_and(Value::is_string) {
            return Err(ConvertError::format(source, "file.base64"));
        }

        serde_json::from_value(value)
            .map_err(|e| ConvertError::malformed(source, e.to_string()))
    }

    /// Decode the payload, ignoring any whitespace it was wrapped with
    pub fn decode_payload(&self, source: &Path) -> Result<Vec<u8>> {
        let compact: String = self
            .file
            .base64
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        base64::engine::general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| ConvertError::malformed(source, format!("file.base64 is not valid base64 ({e})")))
    }
}

/// Current time in a fixed UTC offset, formatted for `createdAt`.
/// Offsets outside ±23 hours fall back to UTC.
pub fn timestamp_now(utc_offset_hours: i32) -> String {
    let offset = utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix());

    Utc::now()
        .with_timezone(&offset)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// `.ext` for names with an extension, empty otherwise (`.bashrc` has none)
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Whether `path` names an archive, compared case-insensitively
pub fn is_archive_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
        .unwrap_or(false)
}

//! File to archive document encoder

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::archive::{ArchiveDocument, DEFAULT_UTC_OFFSET_HOURS};
use crate::error::{ConvertError, Result};
use crate::output::write_output;
use crate::report::EncodeReport;
use crate::resolver::{Mode, Resolution};

/// Turns a file into an archive document
pub struct Encoder {
    /// Offset used to stamp `createdAt`
    utc_offset_hours: i32,
}

impl Encoder {
    /// Create a new encoder stamping times in UTC+8
    pub fn new() -> Self {
        Self {
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }

    /// Use a different fixed offset for `createdAt`
    pub fn with_utc_offset(mut self, hours: i32) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    /// Encode raw bytes into a document named `name`
    pub fn encode(&self, name: &str, data: &[u8]) -> ArchiveDocument {
        ArchiveDocument::new(name, data, self.utc_offset_hours)
    }

    /// Read the resolved input, encode it and write the archive
    pub fn encode_file(&self, resolution: &Resolution) -> Result<EncodeReport> {
        debug_assert_eq!(resolution.mode, Mode::Encode);
        let input = &resolution.input;

        let data = fs::read(input).map_err(|e| ConvertError::io("read", input, e))?;
        let name = file_name_of(input);
        debug!(name = %name, bytes = data.len(), "encoding file");

        let document = self.encode(&name, &data);
        let output_name = resolution
            .output_name
            .clone()
            .ok_or_else(|| ConvertError::InvalidOutput(resolution.output_dir.clone()))?;
        let (output, created_dir) =
            write_output(&resolution.output_dir, output_name, document.to_json()?)?;

        info!(output = %output.display(), "archive written");
        Ok(EncodeReport {
            name,
            size: document.file.size,
            output,
            created_dir,
        })
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use tempfile::tempdir;

    #[test]
    fn test_encode_bytes() {
        let doc = Encoder::new().encode("image.jpg", &[0xFF, 0xD8, 0xFF]);
        assert_eq!(doc.file.name, "image.jpg");
        assert_eq!(doc.file.extension, ".jpg");
        assert_eq!(doc.file.size, 3);
        assert_eq!(doc.file.base64, "/9j/");
    }

    #[test]
    fn test_encode_file_writes_sibling_archive() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.jpg");
        fs::write(&input, vec![7u8; 1536]).unwrap();

        let res = resolve(&input, None).unwrap();
        let report = Encoder::new().encode_file(&res).unwrap();

        assert_eq!(report.name, "photo.jpg");
        assert_eq!(report.size, 1536);
        assert_eq!(report.output, dir.path().join("photo.txt"));
        assert_eq!(report.created_dir, None);

        let text = fs::read(&report.output).unwrap();
        let doc = ArchiveDocument::parse(&text, &report.output).unwrap();
        assert_eq!(doc.file.name, "photo.jpg");
        assert_eq!(doc.file.size, 1536);
        // Input is left alone
        assert_eq!(fs::read(&input).unwrap().len(), 1536);
    }

    #[test]
    fn test_encode_file_into_new_directory() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("notes.md");
        fs::write(&input, "# notes").unwrap();
        let out = dir.path().join("nested/dir/out.txt");

        let res = resolve(&input, Some(out.as_path())).unwrap();
        let report = Encoder::new().encode_file(&res).unwrap();

        assert_eq!(report.output, out);
        assert_eq!(report.created_dir, Some(dir.path().join("nested/dir")));
        assert!(out.is_file());
    }

    #[test]
    fn test_encode_empty_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.dat");
        fs::write(&input, b"").unwrap();

        let res = resolve(&input, None).unwrap();
        let report = Encoder::new().with_utc_offset(0).encode_file(&res).unwrap();
        assert_eq!(report.size, 0);

        let doc = ArchiveDocument::parse(&fs::read(&report.output).unwrap(), &report.output).unwrap();
        assert_eq!(doc.file.base64, "");
    }
}

//! Archive document decoder

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::archive::ArchiveDocument;
use crate::error::{ConvertError, Result};
use crate::output::write_output;
use crate::report::DecodeReport;
use crate::resolver::{Mode, Resolution};

/// Restores the file held by an archive document
pub struct Decoder {
    /// Fail instead of warn when `file.size` disagrees with the payload
    strict_size: bool,
}

impl Decoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self { strict_size: false }
    }

    /// Reject archives whose payload length differs from `file.size`
    pub fn with_strict_size(mut self, strict: bool) -> Self {
        self.strict_size = strict;
        self
    }

    /// Decode archive text into the document and the restored bytes
    pub fn decode(&self, text: &[u8], source: &Path) -> Result<(ArchiveDocument, Vec<u8>)> {
        let document = ArchiveDocument::parse(text, source)?;
        let data = document.decode_payload(source)?;
        self.check_size(&document, data.len() as u64, source)?;
        Ok((document, data))
    }

    /// Read the resolved archive, decode it and write the restored file
    pub fn decode_file(&self, resolution: &Resolution) -> Result<DecodeReport> {
        debug_assert_eq!(resolution.mode, Mode::Decode);
        let input = &resolution.input;

        let text = fs::read(input).map_err(|e| ConvertError::io("read", input, e))?;
        let (document, data) = self.decode(&text, input)?;
        debug!(name = %document.file.name, bytes = data.len(), "decoded archive");

        let name = resolution
            .output_file_name(&document.file.name)
            .ok_or_else(|| ConvertError::format(input, "file.name (needed when no output path is given)"))?;
        let (output, created_dir) = write_output(&resolution.output_dir, name, &data)?;

        info!(output = %output.display(), "file restored");
        Ok(DecodeReport {
            name: document.file.name,
            size: document.file.size,
            output,
            created_dir,
        })
    }

    fn check_size(&self, document: &ArchiveDocument, actual: u64, source: &Path) -> Result<()> {
        let expected = document.file.size;
        if expected == actual {
            return Ok(());
        }

        if self.strict_size {
            return Err(ConvertError::SizeMismatch {
                path: source.to_path_buf(),
                expected,
                actual,
            });
        }

        warn!(
            archive = %source.display(),
            expected,
            actual,
            "declared size does not match decoded payload"
        );
        Ok(())
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

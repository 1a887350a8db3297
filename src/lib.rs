//! # converter-kit
//!
//! Converts any single file into a JSON text archive and back.
//!
//! ## Archive Format
//!
//! An archive is a UTF-8 JSON document holding the file's metadata and its
//! bytes as standard (padded) base64:
//!
//! ```text
//! {
//!   "version": "1.3.5",
//!   "createdAt": "2024-05-01 12:30:00",
//!   "file": {
//!     "name": "photo.jpg",
//!     "extension": ".jpg",
//!     "size": 1536,
//!     "base64": "/9j/4AAQSkZJRgABAQEAYABgAAD..."
//!   }
//! }
//! ```
//!
//! Archives use the `.txt` extension. Key order and indentation are cosmetic;
//! any writer producing these fields can be read back.
//!
//! ## Mode Selection
//!
//! The input's extension alone picks the direction:
//! 1. `*.txt` (any case) → decode the archive back into its file
//! 2. anything else → encode the file into an archive
//!
//! Without an explicit output, encoding writes `<stem>.txt` next to the input
//! and decoding restores the embedded file name next to the archive.
//!
//! ## Example
//!
//! ```no_run
//! use converter_kit::{run, Config};
//!
//! let report = run(&Config::new("photo.jpg"))?;
//! println!("{report}");
//! # Ok::<(), converter_kit::ConvertError>(())
//! ```

pub mod archive;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
mod output;
pub mod report;
pub mod resolver;

pub use archive::{ArchiveDocument, ArchivedFile, ARCHIVE_EXTENSION, VERSION};
pub use config::Config;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{ConvertError, Result};
pub use report::{format_bytes, DecodeReport, EncodeReport, Report};
pub use resolver::{resolve, Mode, Resolution};

/// Resolve paths for `config` and perform the conversion it selects.
pub fn run(config: &Config) -> Result<Report> {
    let resolution = resolve(&config.input, config.output_path())?;

    match resolution.mode {
        Mode::Encode => Encoder::new()
            .with_utc_offset(config.utc_offset_hours)
            .encode_file(&resolution)
            .map(Report::Encoded),
        Mode::Decode => Decoder::new()
            .with_strict_size(config.strict_size)
            .decode_file(&resolution)
            .map(Report::Decoded),
    }
}

//! Status reports returned by a conversion and the byte-size formatting they use.

use std::fmt;
use std::path::PathBuf;

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const KIB: u64 = 1024;

/// Formats a byte count with 1024-based units and at most two decimals
/// (e.g. 1536 -> "1.5 KB", 0 -> "0 Bytes"). Anything past GB stays in GB.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < UNITS.len() && bytes / scale >= KIB {
        scale *= KIB;
        unit += 1;
    }

    let value = (bytes as f64 / scale as f64 * 100.0).round() / 100.0;
    format!("{value} {}", UNITS[unit])
}

/// What an encode wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeReport {
    /// Base name of the source file
    pub name: String,
    pub size: u64,
    pub output: PathBuf,
    pub created_dir: Option<PathBuf>,
}

/// What a decode wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    /// Name embedded in the archive, which may differ from the written file
    pub name: String,
    /// Size declared by the archive
    pub size: u64,
    pub output: PathBuf,
    pub created_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Encoded(EncodeReport),
    Decoded(DecodeReport),
}

impl Report {
    pub fn output(&self) -> &PathBuf {
        match self {
            Report::Encoded(r) => &r.output,
            Report::Decoded(r) => &r.output,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (created_dir, headline, label, name, size, output) = match self {
            Report::Encoded(r) => (&r.created_dir, "File → TXT conversion complete!", "Source", &r.name, r.size, &r.output),
            Report::Decoded(r) => (&r.created_dir, "TXT → File restore complete!", "File", &r.name, r.size, &r.output),
        };

        if let Some(dir) = created_dir {
            writeln!(f, "📁 Created directory: {}", dir.display())?;
        }
        writeln!(f, "✅ {headline}")?;
        writeln!(f, "   {label}: {name} ({})", format_bytes(size))?;
        write!(f, "   Output: {}", output.display())
    }
}

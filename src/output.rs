//! Writing results to disk

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ConvertError, Result};

/// Write `contents` to `dir/name`, creating `dir` (recursively) first if needed.
///
/// Returns the written path and, when it had to be created, the directory.
/// An existing file is overwritten in a single write call.
pub(crate) fn write_output(
    dir: &Path,
    name: impl AsRef<Path>,
    contents: impl AsRef<[u8]>,
) -> Result<(PathBuf, Option<PathBuf>)> {
    let created_dir = if dir.exists() {
        None
    } else {
        fs::create_dir_all(dir).map_err(|e| ConvertError::io("create directory", dir, e))?;
        info!(dir = %dir.display(), "created output directory");
        Some(dir.to_path_buf())
    };

    let path = dir.join(name);
    fs::write(&path, contents).map_err(|e| ConvertError::io("write", &path, e))?;
    Ok((path, created_dir))
}

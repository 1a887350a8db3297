//! Decides the operation mode and where output goes.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::archive::{is_archive_path, ARCHIVE_EXTENSION};
use crate::error::{ConvertError, Result};

/// Direction of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Any file into an archive document
    Encode,
    /// An archive document back into its file
    Decode,
}

/// Outcome of path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Absolute path of the input file
    pub input: PathBuf,
    pub mode: Mode,
    /// Directory the output is written to (may not exist yet)
    pub output_dir: PathBuf,
    /// Output file name. `None` only when decoding without an explicit output,
    /// in which case the name embedded in the archive is used.
    pub output_name: Option<OsString>,
}

impl Resolution {
    /// Name to write under: the explicit one if resolved, else the last
    /// component of `embedded`, so an archive can only name a file inside
    /// `output_dir`. `None` when neither yields a usable name.
    pub fn output_file_name<'a>(&'a self, embedded: &'a str) -> Option<&'a OsStr> {
        match &self.output_name {
            Some(name) => Some(name.as_os_str()),
            None => Path::new(embedded).file_name(),
        }
    }
}

/// Resolve `input` and the optional `output` against the current directory.
///
/// Only checks that the input exists and is not a directory; nothing is created.
pub fn resolve(input: &Path, output: Option<&Path>) -> Result<Resolution> {
    let input = absolute(input)?;

    let metadata = fs::metadata(&input).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConvertError::NotFound(input.clone()),
        _ => ConvertError::io("inspect", &input, e),
    })?;
    if metadata.is_dir() {
        return Err(ConvertError::InvalidInput(input));
    }

    let mode = if is_archive_path(&input) {
        Mode::Decode
    } else {
        Mode::Encode
    };

    let (output_dir, output_name) = match output {
        Some(output) => {
            let (dir, name) = split_output(output)?;
            (dir, Some(name))
        }
        None => {
            let dir = parent_of(&input);
            let name = match mode {
                Mode::Encode => Some(default_archive_name(&input)),
                Mode::Decode => None,
            };
            (dir, name)
        }
    };

    debug!(
        input = %input.display(),
        ?mode,
        output_dir = %output_dir.display(),
        output_name = ?output_name,
        "resolved paths"
    );

    Ok(Resolution {
        input,
        mode,
        output_dir,
        output_name,
    })
}

/// `photo.jpg` -> `photo.txt`
fn default_archive_name(input: &Path) -> OsString {
    let mut name = input
        .file_stem()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".");
    name.push(ARCHIVE_EXTENSION);
    name
}

fn split_output(output: &Path) -> Result<(PathBuf, OsString)> {
    let output = absolute(output)?;
    let name = output
        .file_name()
        .map(OsString::from)
        .ok_or_else(|| ConvertError::InvalidOutput(output.clone()))?;
    Ok((parent_of(&output), name))
}

fn parent_of(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"))
}

/// Absolute form of `path` with `.` and `..` folded away lexically
fn absolute(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| ConvertError::io("resolve", path, e))?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_encode_mode_defaults_to_sibling_archive() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.jpg");
        fs::write(&input, b"jpeg").unwrap();

        let res = resolve(&input, None).unwrap();
        assert_eq!(res.mode, Mode::Encode);
        assert_eq!(res.input, input);
        assert_eq!(res.output_dir, dir.path());
        assert_eq!(res.output_name, Some(OsString::from("photo.txt")));
    }

    #[test]
    fn test_decode_mode_leaves_name_open() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("archive.txt");
        fs::write(&input, b"{}").unwrap();

        let res = resolve(&input, None).unwrap();
        assert_eq!(res.mode, Mode::Decode);
        assert_eq!(res.output_dir, dir.path());
        assert_eq!(res.output_name, None);
        assert_eq!(res.output_file_name("photo.jpg"), Some(OsStr::new("photo.jpg")));
        assert_eq!(res.output_file_name("../up/photo.jpg"), Some(OsStr::new("photo.jpg")));
        assert_eq!(res.output_file_name(""), None);
        assert_eq!(res.output_file_name(".."), None);
    }

    #[test]
    fn test_mode_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("archive.TXT");
        fs::write(&input, b"{}").unwrap();

        assert_eq!(resolve(&input, None).unwrap().mode, Mode::Decode);
    }

    #[test]
    fn test_no_extension_gets_archive_extension() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("Makefile");
        fs::write(&input, b"all:").unwrap();

        let res = resolve(&input, None).unwrap();
        assert_eq!(res.output_name, Some(OsString::from("Makefile.txt")));
    }

    #[test]
    fn test_explicit_output_splits_dir_and_name() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("archive.txt");
        fs::write(&input, b"{}").unwrap();
        let out = dir.path().join("nested/dir/restored.bin");

        let res = resolve(&input, Some(out.as_path())).unwrap();
        assert_eq!(res.mode, Mode::Decode);
        assert_eq!(res.output_dir, dir.path().join("nested/dir"));
        assert_eq!(res.output_name, Some(OsString::from("restored.bin")));
        assert_eq!(res.output_file_name("ignored.jpg"), Some(OsStr::new("restored.bin")));
        // Resolution never creates anything
        assert!(!dir.path().join("nested").exists());
    }

    #[test]
    fn test_relative_paths_become_absolute() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.jpg");
        fs::write(&input, b"jpeg").unwrap();

        let res = resolve(&input, Some(Path::new("out/photo.txt"))).unwrap();
        assert!(res.output_dir.is_absolute());
        assert!(res.output_dir.ends_with("out"));
    }

    #[test]
    fn test_parent_components_are_folded() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let input = dir.path().join("photo.jpg");
        fs::write(&input, b"jpeg").unwrap();

        let res = resolve(&dir.path().join("sub/../photo.jpg"), None).unwrap();
        assert_eq!(res.input, input);
        assert_eq!(res.output_dir, dir.path());

        let out = dir.path().join("sub/./../out/photo.txt");
        let res = resolve(&input, Some(out.as_path())).unwrap();
        assert_eq!(res.output_dir, dir.path().join("out"));
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir().unwrap();
        let err = resolve(&dir.path().join("nope.jpg"), None).unwrap_err();
        assert!(matches!(err, ConvertError::NotFound(_)));
    }

    #[test]
    fn test_directory_input() {
        let dir = tempdir().unwrap();
        let err = resolve(dir.path(), None).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidInput(_)));
    }

    #[test]
    fn test_output_without_name() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.jpg");
        fs::write(&input, b"jpeg").unwrap();

        let err = resolve(&input, Some(Path::new("/"))).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidOutput(_)));
    }
}

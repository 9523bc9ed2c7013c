use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// `rwxr-xr-x`
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Splits a destination into the directory that will hold it and its base name.
///
/// An empty directory component becomes `"."` so the temporary artifact is
/// always created beside the final file, never in the system temp location.
pub fn split_destination(path: &Path) -> Result<(PathBuf, OsString)> {
    let invalid = || Error::InvalidDestination {
        path: path.to_path_buf(),
    };

    // `Path::file_name` skips a trailing separator or `.` component, so
    // "out/" and "out/." would otherwise be treated as a file named "out".
    let raw = path.as_os_str().to_string_lossy();
    if raw.ends_with(std::path::is_separator)
        || raw.rsplit(std::path::is_separator).next() == Some(".")
    {
        return Err(invalid());
    }

    let base = path.file_name().ok_or_else(invalid)?.to_os_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((dir, base))
}

/// Recursively creates `dir` if absent. `mode` applies on Unix only.
pub fn prepare_dir(dir: &Path, mode: u32) -> Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(dir).map_err(|source| Error::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

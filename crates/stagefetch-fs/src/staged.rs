use std::ffi::OsString;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, PersistError};

use crate::{Error, Result};

const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

#[derive(Clone, Copy, Debug)]
pub struct StageOptions {
    prefix:          &'static str,
    suffix:          &'static str,
    sync:            bool,
    permissions:     Option<u32>,
    buffer_capacity: usize,
}

impl Default for StageOptions {
    fn default() -> Self { Self::new() }
}

impl StageOptions {
    pub fn new() -> Self {
        Self {
            prefix:          ".",
            suffix:          ".tmp",
            sync:            false,
            permissions:     None,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }

    pub fn prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }

    /// Flush file contents to disk before the rename.
    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Mode bits applied to the artifact before promotion. Unix only; the
    /// default keeps the owner-only mode the temporary file is created with.
    pub fn permissions(mut self, mode: u32) -> Self {
        self.permissions = Some(mode);
        self
    }

    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(1);
        self
    }
}

/// A uniquely named temporary file waiting to replace `destination`.
///
/// Until [`commit`](Self::commit) succeeds the artifact is owned by this
/// value and removed when it is dropped.
pub struct StagedFile {
    writer:      BufWriter<NamedTempFile>,
    destination: PathBuf,
    options:     StageOptions,
}

impl StagedFile {
    /// Creates `"{prefix}{base}.XXXXXX{suffix}"` inside `dir`.
    ///
    /// `dir` must be on the same filesystem as `destination` for the final
    /// rename to be atomic; callers pass the destination's own directory.
    pub fn create(
        dir: &Path,
        base: &std::ffi::OsStr,
        destination: impl Into<PathBuf>,
        options: StageOptions,
    ) -> Result<Self> {
        let mut prefix = OsString::from(options.prefix);
        prefix.push(base);
        prefix.push(".");

        let file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(options.suffix)
            .tempfile_in(dir)
            .map_err(|source| Error::CreateTemp {
                dir: dir.to_path_buf(),
                source,
            })?;

        tracing::debug!(path = %file.path().display(), "created staging file");

        Ok(Self {
            writer: BufWriter::with_capacity(options.buffer_capacity, file),
            destination: destination.into(),
            options,
        })
    }

    pub fn path(&self) -> &Path { self.writer.get_ref().path() }

    pub fn destination(&self) -> &Path { &self.destination }

    /// Flushes, optionally syncs, and renames the artifact over the
    /// destination, replacing any file already there.
    pub fn commit(self) -> Result<PathBuf> {
        let Self {
            writer,
            destination,
            options,
        } = self;

        let file = writer.into_inner().map_err(|err| {
            let (source, writer) = err.into_parts();
            Error::Finalize {
                path: writer.get_ref().path().to_path_buf(),
                source,
            }
        })?;

        finalize(&file, &options).map_err(|source| Error::Finalize {
            path: file.path().to_path_buf(),
            source,
        })?;

        match file.persist(&destination) {
            Ok(_) => Ok(destination),
            Err(PersistError { error, file }) => {
                let from = file.path().to_path_buf();
                if let Err(e) = file.close() {
                    tracing::warn!(path = %from.display(), error = %e, "failed to remove staging file");
                }
                Err(Error::Rename {
                    from,
                    to: destination,
                    source: error,
                })
            }
        }
    }
}

fn finalize(file: &NamedTempFile, options: &StageOptions) -> io::Result<()> {
    #[cfg(unix)]
    if let Some(mode) = options.permissions {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(mode))?;
    }

    if options.sync {
        file.as_file().sync_all()?;
    }

    Ok(())
}

impl Write for StagedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.writer.write(buf) }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> { self.writer.write_all(buf) }

    fn flush(&mut self) -> io::Result<()> { self.writer.flush() }
}

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("destination has no file name: '{path}'")]
    InvalidDestination { path: PathBuf },

    #[error("failed to create directory '{path}': {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to create temporary file in '{dir}': {source}")]
    CreateTemp { dir: PathBuf, source: io::Error },

    #[error("failed to write and close '{path}': {source}")]
    Finalize { path: PathBuf, source: io::Error },

    #[error("failed to rename '{from}' to '{to}': {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

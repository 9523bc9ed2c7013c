//! Error types for stagefetch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::codec::Codec;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The first failure encountered by a fetch, tagged with the stage it came from.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("destination has no file name: '{path}'")]
    InvalidDestination { path: PathBuf },

    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreation { path: PathBuf, source: io::Error },

    #[error("failed to create temporary file in '{dir}': {source}")]
    TempFile { dir: PathBuf, source: io::Error },

    #[error("invalid request for '{url}': {source}")]
    RequestConstruction { url: String, source: BoxError },

    #[error("request to '{url}' failed: {source}")]
    Transport { url: String, source: BoxError },

    #[error("invalid {codec} stream: {source}")]
    DecompressionInit { codec: Codec, source: io::Error },

    #[error("failed to copy response body: {source}")]
    Copy { source: io::Error },

    #[error("failed to write and close '{path}': {source}")]
    Finalize { path: PathBuf, source: io::Error },

    #[error("failed to rename '{from}' to '{to}': {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

/// Flat classification of [`FetchError`], one per pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidDestination,
    DirectoryCreation,
    TempFile,
    RequestConstruction,
    Transport,
    DecompressionInit,
    Copy,
    Finalize,
    Rename,
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidDestination { .. } => ErrorKind::InvalidDestination,
            FetchError::DirectoryCreation { .. } => ErrorKind::DirectoryCreation,
            FetchError::TempFile { .. } => ErrorKind::TempFile,
            FetchError::RequestConstruction { .. } => ErrorKind::RequestConstruction,
            FetchError::Transport { .. } => ErrorKind::Transport,
            FetchError::DecompressionInit { .. } => ErrorKind::DecompressionInit,
            FetchError::Copy { .. } => ErrorKind::Copy,
            FetchError::Finalize { .. } => ErrorKind::Finalize,
            FetchError::Rename { .. } => ErrorKind::Rename,
        }
    }
}

impl From<stagefetch_fs::Error> for FetchError {
    fn from(e: stagefetch_fs::Error) -> Self {
        use stagefetch_fs::Error as Fs;

        match e {
            Fs::InvalidDestination { path } => FetchError::InvalidDestination { path },
            Fs::CreateDir { path, source } => FetchError::DirectoryCreation { path, source },
            Fs::CreateTemp { dir, source } => FetchError::TempFile { dir, source },
            Fs::Finalize { path, source } => FetchError::Finalize { path, source },
            Fs::Rename { from, to, source } => FetchError::Rename { from, to, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

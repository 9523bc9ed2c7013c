use std::io;
use std::path::{Path, PathBuf};

use stagefetch_fs::{StagedFile, prepare_dir, split_destination};
use url::Url;

use crate::codec::Codec;
use crate::error::{FetchError, Result};
use crate::http::HttpClient;
use crate::options::FetchOptions;

/// Outcome of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub destination:   PathBuf,
    pub codec:         Codec,
    /// Bytes written after decoding.
    pub bytes_written: u64,
}

/// Downloads a URL into a file, decoding it according to the URL path.
///
/// Each call stages into its own temporary file next to the destination,
/// so calls for distinct destinations can run concurrently on a shared
/// client. Two calls for the same destination both succeed and the last
/// rename wins.
pub struct Fetcher<C: HttpClient> {
    client:  C,
    options: FetchOptions,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            options: FetchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn client(&self) -> &C { &self.client }

    pub fn options(&self) -> &FetchOptions { &self.options }

    /// Fetches `url` into `destination`.
    ///
    /// On success the destination holds the complete decoded body. On any
    /// error the destination is exactly as it was and no temporary file is
    /// left in its directory. Nothing is retried and the HTTP status is not
    /// inspected.
    pub fn fetch(&self, url: &Url, destination: impl AsRef<Path>) -> Result<FetchReport> {
        let destination = destination.as_ref();
        let _span = tracing::debug_span!(
            "fetch",
            %url,
            destination = %destination.display()
        )
        .entered();

        let (dir, base) = split_destination(destination)?;
        prepare_dir(&dir, self.options.dir_mode)?;

        // Dropping `staged` on any early return removes the artifact.
        let mut staged = StagedFile::create(&dir, &base, destination, self.options.stage)?;

        let request = self
            .client
            .build_get(url)
            .map_err(|e| FetchError::RequestConstruction {
                url:    url.to_string(),
                source: Box::new(e),
            })?;
        let body = self
            .client
            .execute(request)
            .map_err(|e| FetchError::Transport {
                url:    url.to_string(),
                source: Box::new(e),
            })?;

        let codec = Codec::from_url_path(url.path());
        tracing::debug!(%codec, "decoder selected");

        let bytes_written = {
            let mut reader = codec.decoder(body)?;
            io::copy(&mut reader, &mut staged).map_err(|source| FetchError::Copy { source })?
        };

        let destination = staged.commit()?;
        tracing::info!(
            destination = %destination.display(),
            %codec,
            bytes_written,
            "fetch complete"
        );

        Ok(FetchReport {
            destination,
            codec,
            bytes_written,
        })
    }
}

/// Fetches `url` into `destination` with default options.
pub fn fetch<C: HttpClient>(
    client: C,
    url: &Url,
    destination: impl AsRef<Path>,
) -> Result<FetchReport> {
    Fetcher::new(client).fetch(url, destination)
}

/// Like [`fetch`], parsing `url` first.
pub fn fetch_str<C: HttpClient>(
    client: C,
    url: &str,
    destination: impl AsRef<Path>,
) -> Result<FetchReport> {
    let parsed = Url::parse(url).map_err(|e| FetchError::RequestConstruction {
        url:    url.to_string(),
        source: Box::new(e),
    })?;
    fetch(client, &parsed, destination)
}

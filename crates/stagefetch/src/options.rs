use stagefetch_fs::{DEFAULT_DIR_MODE, StageOptions};

/// Configuration for a [`Fetcher`](crate::Fetcher).
///
/// HTTP behavior (timeouts, TLS, redirects, proxies) is not configured
/// here; it belongs to the client handed to the fetcher.
///
/// # Examples
///
/// ```
/// use stagefetch::{FetchOptions, StageOptions};
///
/// let options = FetchOptions::default()
///     .dir_mode(0o750)
///     .stage(StageOptions::new().sync(true));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FetchOptions {
    /// Mode bits for directories created on the way to the destination.
    ///
    /// Unix only. Default: `0o755`
    pub dir_mode: u32,

    /// How the staging file is named and flushed.
    pub stage: StageOptions,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            dir_mode: DEFAULT_DIR_MODE,
            stage:    StageOptions::new(),
        }
    }
}

impl FetchOptions {
    pub fn dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    pub fn stage(mut self, stage: StageOptions) -> Self {
        self.stage = stage;
        self
    }
}

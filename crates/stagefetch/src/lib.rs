//! HTTP downloading with suffix-selected decompression and atomic placement.
//!
//! # Architecture
//!
//! - [`http`] - Blocking HTTP client seam, implemented for `reqwest`
//! - [`codec`] - Decoder selection from the URL path suffix
//! - [`fetcher`] - The linear pipeline: directory, staging file, request,
//!   decode, copy, commit
//!
//! # Key Features
//!
//! - **Atomic Placement**: bytes land in a sibling temporary file that is
//!   renamed over the destination only after a complete copy
//! - **Guaranteed Cleanup**: the temporary file is removed on every failure path
//! - **Mechanism-Only**: nothing is retried; timeouts and status policy
//!   belong to the caller's client

pub mod codec;
pub mod fetcher;
pub mod http;

mod error;
mod options;

pub use codec::Codec;
pub use error::{BoxError, ErrorKind, FetchError, Result};
pub use fetcher::{FetchReport, Fetcher, fetch, fetch_str};
pub use http::HttpClient;
pub use options::FetchOptions;

pub use stagefetch_fs::StageOptions;
pub use url::Url;

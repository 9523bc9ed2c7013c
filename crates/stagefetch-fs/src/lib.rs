//! Staged temporary files with atomic promotion.
//!
//! A [`StagedFile`] is created next to its destination, receives bytes
//! through [`std::io::Write`], and is renamed over the destination by
//! [`StagedFile::commit`]. Dropping it before a successful commit removes the
//! temporary artifact, so no exit path leaves one behind.

mod destination;
mod error;
mod staged;

pub use destination::{DEFAULT_DIR_MODE, prepare_dir, split_destination};
pub use error::{Error, Result};
pub use staged::{StageOptions, StagedFile};

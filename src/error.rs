//! Error taxonomy for a merge run.
//!
//! Fatal errors end the run and surface from [`crate::merge::Merger::run`].
//! Per-file errors never leave the merger: they are rendered into the output
//! as an inline marker and traversal continues.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A failure that ends the whole run.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The root is missing or is not a directory. Nothing was written.
    #[error("folder '{}' does not exist or is not a valid directory", path.display())]
    InvalidRoot { path: PathBuf },

    /// The destination could not be opened for writing. Traversal never started.
    #[error("cannot write output file '{}': {source}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other fault during traversal. Output flushed so far is kept.
    #[error("unexpected error while merging into '{}': {source}", path.display())]
    Unexpected {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MergeError {
    /// True for errors raised before any traversal took place.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidRoot { .. } | Self::OutputOpen { .. })
    }
}

/// A per-file failure, absorbed into the output.
#[derive(Debug, Error)]
pub enum FileReadError {
    /// Permission denied, vanished file, or another I/O fault.
    #[error("{0}")]
    Access(#[from] io::Error),

    /// Malformed input under strict decoding.
    #[error("'{encoding}' codec can't decode byte sequence at offset {offset}")]
    Decode { encoding: &'static str, offset: usize },
}

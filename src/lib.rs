//! merge-tree: merge a directory tree into one flat text file
//!
//! Every file under a root directory is appended to a single output file,
//! wrapped in a path header and an end-of-file delimiter, so a whole project
//! can be handed to a text-consuming process in one piece.
//!
//! ```no_run
//! let stats = merge_tree::merge("my-project", "my-project.txt")?;
//! println!("merged {} files", stats.files_merged);
//! # Ok::<(), merge_tree::MergeError>(())
//! ```

pub mod cli;
pub mod domain;
pub mod error;
pub mod merge;
pub mod render;
pub mod scan;
pub mod utils;

pub use domain::{DecodeErrors, MergeStats, MergedFile, DEFAULT_OUTPUT_FILENAME};
pub use error::{FileReadError, MergeError};
pub use merge::{merge, Merger};
pub use utils::FallbackEncoding;

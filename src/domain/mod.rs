//! Core types shared across the merge pipeline.

use serde::{Serialize, Serializer};

/// Report schema version, bumped on breaking changes to `--report` output.
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// File name used when no output path is given.
pub const DEFAULT_OUTPUT_FILENAME: &str = "output_merged_files.txt";

/// Directory names that are never descended into.
pub fn default_excluded_dirs() -> &'static [&'static str] {
    &[".git", ".svn", "__pycache__", ".vscode", ".idea", "build"]
}

/// What to do with byte sequences that are malformed under the fallback encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeErrors {
    /// Drop malformed sequences and keep the rest of the text.
    #[default]
    Ignore,
    /// Replace the whole content with an error marker.
    Strict,
}

/// One entry written to the merged output.
#[derive(Debug, Clone, Serialize)]
pub struct MergedFile {
    /// Path as traversed (root joined with the relative path).
    pub path: String,
    /// Bytes of decoded text written for this entry; zero for error markers.
    pub bytes: u64,
    /// Read failure description, when the content was replaced by a marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Counters for a single merge run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeStats {
    pub files_visited: usize,
    pub files_merged: usize,
    pub files_read_errors: usize,
    pub files_skipped_self: usize,
    pub dirs_pruned: usize,
    pub entries_unreadable: usize,
    pub bytes_written: u64,
    #[serde(serialize_with = "serialize_millis")]
    pub processing_time_seconds: f64,
    /// Reported separately from the counters.
    #[serde(skip)]
    pub files: Vec<MergedFile>,
}

impl MergeStats {
    pub(crate) fn record(&mut self, file: MergedFile) {
        self.files_merged += 1;
        if file.error.is_some() {
            self.files_read_errors += 1;
        }
        self.bytes_written += file.bytes;
        self.files.push(file);
    }
}

fn serialize_millis<S: Serializer>(seconds: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((seconds * 1000.0).round() / 1000.0)
}

//! Self-reference guard.

use crate::utils::resolve_absolute;
use std::path::{Path, PathBuf};

/// Why a file was kept out of the merged output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The file is the merge destination.
    Output,
    /// The file is the running program.
    Program,
}

/// Absolute paths that must never be read as input.
#[derive(Debug, Clone, Default)]
pub struct SkipSet {
    output: Option<PathBuf>,
    program: Option<PathBuf>,
}

impl SkipSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, path: &Path) -> Self {
        self.output = Some(resolve_absolute(path));
        self
    }

    pub fn with_program(mut self, path: Option<&Path>) -> Self {
        self.program = path.map(resolve_absolute);
        self
    }

    /// The current executable, if the platform can report it.
    pub fn current_program() -> Option<PathBuf> {
        match std::env::current_exe() {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::warn!("Cannot determine program path, it will not be skipped: {}", err);
                None
            }
        }
    }

    /// Match `path` against the guarded paths.
    pub fn check(&self, path: &Path) -> Option<SkipReason> {
        if self.output.is_none() && self.program.is_none() {
            return None;
        }
        let absolute = resolve_absolute(path);
        if self.output.as_deref() == Some(absolute.as_path()) {
            return Some(SkipReason::Output);
        }
        if self.program.as_deref() == Some(absolute.as_path()) {
            return Some(SkipReason::Program);
        }
        None
    }
}

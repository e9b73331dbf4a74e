//! Deterministic depth-first directory walk.

use crate::scan::skip::{SkipReason, SkipSet};
use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// One file reached by the walk.
#[derive(Debug, Clone, Copy)]
pub enum Visit<'a> {
    /// A file to merge. The path is the root joined with the relative path.
    File(&'a Path),
    /// A file matched by the skip set.
    Skipped(&'a Path, SkipReason),
}

/// Counters gathered while walking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub files_visited: usize,
    pub dirs_pruned: usize,
    pub entries_unreadable: usize,
}

/// Walks a tree top-down: at each level the files come first in name order,
/// then each subdirectory is descended in name order. Excluded directory
/// names are pruned before descending.
pub struct TreeWalker {
    root_path: PathBuf,
    excluded_dirs: BTreeSet<String>,
    follow_symlinks: bool,
    skip: SkipSet,
}

impl TreeWalker {
    /// Create a walker with the default exclusion set.
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            excluded_dirs: crate::domain::default_excluded_dirs()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            follow_symlinks: false,
            skip: SkipSet::default(),
        }
    }

    /// Add directory names to prune on top of the defaults.
    pub fn exclude_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set whether to descend into symlinked directories
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set the paths that are reported as skipped instead of visited
    pub fn skip(mut self, skip: SkipSet) -> Self {
        self.skip = skip;
        self
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && is_dir_like(entry)
            && entry.file_name().to_str().is_some_and(|name| self.excluded_dirs.contains(name))
    }

    /// Walk the tree and hand every file to `visit`, stopping at its first error.
    ///
    /// Entries that cannot be listed are logged and skipped.
    pub fn walk<E, F>(&self, mut visit: F) -> Result<WalkSummary, E>
    where
        F: FnMut(Visit<'_>) -> Result<(), E>,
    {
        let mut summary = WalkSummary::default();
        let pruned = Cell::new(0usize);

        let walker = WalkDir::new(&self.root_path)
            .follow_links(self.follow_symlinks)
            .sort_by(files_then_dirs)
            .into_iter()
            .filter_entry(|entry| {
                if self.is_excluded(entry) {
                    tracing::debug!("Pruning excluded directory {}", entry.path().display());
                    pruned.set(pruned.get() + 1);
                    return false;
                }
                true
            });

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry: {}", err);
                    summary.entries_unreadable += 1;
                    continue;
                }
            };

            if is_dir_like(&entry) {
                continue;
            }

            summary.files_visited += 1;
            let path = entry.path();
            match self.skip.check(path) {
                Some(reason) => visit(Visit::Skipped(path, reason))?,
                None => visit(Visit::File(path))?,
            }
        }

        summary.dirs_pruned = pruned.get();
        Ok(summary)
    }
}

/// Directories and symlinks to directories sort (and behave) as directories.
fn is_dir_like(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

fn files_then_dirs(a: &DirEntry, b: &DirEntry) -> Ordering {
    is_dir_like(a).cmp(&is_dir_like(b)).then_with(|| a.file_name().cmp(b.file_name()))
}

//! Path resolution

use std::path::{Path, PathBuf};

/// Resolve `path` to an absolute form suitable for identity comparison.
///
/// Existing paths are canonicalized so symlinks and `..` segments collapse.
/// Paths that do not exist yet are made absolute against the working directory.
pub fn resolve_absolute(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

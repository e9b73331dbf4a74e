//! merge-tree: merge every file of a directory tree into one text file

use anyhow::Result;

fn main() -> Result<()> {
    merge_tree::cli::run()
}

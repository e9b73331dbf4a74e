//! The merge run: walk the tree, decode each file, append it to the output.

pub mod writer;

use crate::domain::{DecodeErrors, MergeStats, MergedFile};
use crate::error::MergeError;
use crate::scan::{SkipReason, SkipSet, TreeWalker, Visit};
use crate::utils::{read_with_fallback, FallbackEncoding};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub use writer::EntryWriter;

/// Merge every file under `root_dir` into `output_path` with default settings.
///
/// The running program is added to the skip set when its path can be determined.
pub fn merge(
    root_dir: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<MergeStats, MergeError> {
    Merger::new(root_dir.as_ref().to_path_buf(), output_path.as_ref().to_path_buf())
        .program_path(SkipSet::current_program())
        .run()
}

/// A configured merge run.
#[derive(Debug, Clone)]
pub struct Merger {
    root_dir: PathBuf,
    output_path: PathBuf,
    encoding: FallbackEncoding,
    decode_errors: DecodeErrors,
    extra_excluded_dirs: Vec<String>,
    follow_symlinks: bool,
    program_path: Option<PathBuf>,
    progress: bool,
}

impl Merger {
    pub fn new(root_dir: PathBuf, output_path: PathBuf) -> Self {
        Self {
            root_dir,
            output_path,
            encoding: FallbackEncoding::default(),
            decode_errors: DecodeErrors::default(),
            extra_excluded_dirs: Vec::new(),
            follow_symlinks: false,
            program_path: None,
            progress: true,
        }
    }

    /// Set the encoding assumed for every input file
    pub fn encoding(mut self, encoding: FallbackEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set how malformed input bytes are handled
    pub fn decode_errors(mut self, decode_errors: DecodeErrors) -> Self {
        self.decode_errors = decode_errors;
        self
    }

    /// Prune these directory names in addition to the defaults
    pub fn exclude_dirs(mut self, names: Vec<String>) -> Self {
        self.extra_excluded_dirs = names;
        self
    }

    /// Set whether to descend into symlinked directories
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set the program file that must never be merged
    pub fn program_path(mut self, path: Option<PathBuf>) -> Self {
        self.program_path = path;
        self
    }

    /// Set whether to print per-file progress lines
    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn fallback_encoding(&self) -> FallbackEncoding {
        self.encoding
    }

    pub fn decode_error_mode(&self) -> DecodeErrors {
        self.decode_errors
    }

    /// Run the merge.
    ///
    /// The root is validated before the output is touched. Per-file read
    /// failures become inline markers; any write failure ends the run.
    pub fn run(&self) -> Result<MergeStats, MergeError> {
        let started = Instant::now();

        if !self.root_dir.is_dir() {
            return Err(MergeError::InvalidRoot { path: self.root_dir.clone() });
        }

        println!("Processing folder: {}", self.root_dir.display());
        println!("Output file: {}", self.output_path.display());

        let file = File::create(&self.output_path).map_err(|source| MergeError::OutputOpen {
            path: self.output_path.clone(),
            source,
        })?;
        let mut writer = EntryWriter::new(BufWriter::new(file));

        let skip = SkipSet::new()
            .with_output(&self.output_path)
            .with_program(self.program_path.as_deref());
        let walker = TreeWalker::new(self.root_dir.clone())
            .exclude_dirs(self.extra_excluded_dirs.iter().cloned())
            .follow_symlinks(self.follow_symlinks)
            .skip(skip);

        let mut stats = MergeStats::default();
        let walked = walker.walk(|visit| -> io::Result<()> {
            match visit {
                Visit::Skipped(path, reason) => {
                    stats.files_skipped_self += 1;
                    match reason {
                        SkipReason::Output => println!("Skipping output file: {}", path.display()),
                        SkipReason::Program => {
                            println!("Skipping program file itself: {}", path.display())
                        }
                    }
                    Ok(())
                }
                Visit::File(path) => {
                    let entry = self.merge_file(&mut writer, path)?;
                    stats.record(entry);
                    Ok(())
                }
            }
        });

        let summary = match walked {
            Ok(summary) => summary,
            Err(source) => {
                // Keep whatever made it this far.
                let _ = writer.flush();
                return Err(MergeError::Unexpected { path: self.output_path.clone(), source });
            }
        };

        writer
            .flush()
            .map_err(|source| MergeError::Unexpected { path: self.output_path.clone(), source })?;
        drop(writer);

        stats.files_visited = summary.files_visited;
        stats.dirs_pruned = summary.dirs_pruned;
        stats.entries_unreadable = summary.entries_unreadable;
        stats.processing_time_seconds = started.elapsed().as_secs_f64();

        println!("Done! All content merged into: {}", self.output_path.display());
        Ok(stats)
    }

    fn merge_file<W: io::Write>(
        &self,
        writer: &mut EntryWriter<W>,
        path: &Path,
    ) -> io::Result<MergedFile> {
        writer.write_header(path)?;
        if self.progress {
            println!("Processing file: {}", path.display());
        }
        tracing::debug!("Reading {} as {}", path.display(), self.encoding);

        let entry = match read_with_fallback(path, self.encoding, self.decode_errors) {
            Ok(text) => {
                writer.write_content(&text)?;
                MergedFile { path: path.display().to_string(), bytes: text.len() as u64, error: None }
            }
            Err(err) => {
                let marker = writer::error_marker(path, self.encoding, &err);
                println!("{}", marker);
                tracing::debug!("Could not read {}: {}", path.display(), err);
                writer.write_error_marker(path, self.encoding, &err)?;
                MergedFile { path: path.display().to_string(), bytes: 0, error: Some(err.to_string()) }
            }
        };

        writer.write_footer()?;
        Ok(entry)
    }
}

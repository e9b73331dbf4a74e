//! Command-line interface for merge-tree
//!
//! With no arguments, merges the directory holding the executable into
//! `output_merged_files.txt` next to it.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod utils;

use crate::domain::{DecodeErrors, DEFAULT_OUTPUT_FILENAME};
use crate::merge::Merger;
use crate::render::write_report;
use crate::scan::SkipSet;
use crate::utils::FallbackEncoding;
use utils::parse_csv;

/// Merge every text file of a directory tree into one flat file
#[derive(Parser)]
#[command(name = "merge-tree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to merge [default: the directory containing this program]
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Output file [default: <ROOT>/output_merged_files.txt]
    #[arg(short, long, value_name = "FILE", env = "MERGE_TREE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Encoding assumed for every input file (WHATWG label, e.g. utf-8, gbk)
    #[arg(short, long, value_name = "LABEL", env = "MERGE_TREE_ENCODING", default_value = "utf-8")]
    pub encoding: FallbackEncoding,

    /// Replace a file's content with an error marker when it has malformed bytes
    #[arg(long)]
    pub strict_decoding: bool,

    /// Extra directory names to skip (comma-separated)
    #[arg(short = 'x', long, value_name = "NAMES")]
    pub exclude_dir: Option<String>,

    /// Descend into symbolically linked directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Write a JSON run report to this path
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Omit the generation timestamp from the report
    #[arg(long)]
    pub no_timestamp: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Suppress per-file progress lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "merge-tree", &mut std::io::stdout());
        return Ok(());
    }

    let program = SkipSet::current_program();
    let root = match cli.root.clone() {
        Some(root) => root,
        None => default_root(program.as_deref())?,
    };
    let output = cli.output.clone().unwrap_or_else(|| root.join(DEFAULT_OUTPUT_FILENAME));

    let merger = Merger::new(root, output)
        .encoding(cli.encoding)
        .decode_errors(if cli.strict_decoding { DecodeErrors::Strict } else { DecodeErrors::Ignore })
        .exclude_dirs(parse_csv(&cli.exclude_dir).unwrap_or_default())
        .follow_symlinks(cli.follow_symlinks)
        .program_path(program)
        .progress(!cli.quiet);

    // Merge failures are reported but never change the exit status.
    let stats = match merger.run() {
        Ok(stats) => stats,
        Err(err) => {
            eprintln!("Error: {}", err);
            return Ok(());
        }
    };

    println!();
    println!("Statistics:");
    println!("  Files visited:    {}", stats.files_visited);
    println!("  Files merged:     {}", stats.files_merged);
    if stats.files_read_errors > 0 {
        println!("  Unreadable files: {}", stats.files_read_errors);
    }
    println!("  Skipped (self):   {}", stats.files_skipped_self);
    println!("  Dirs pruned:      {}", stats.dirs_pruned);
    println!("  Bytes written:    {}", stats.bytes_written);
    println!("  Processing time:  {:.2}s", stats.processing_time_seconds);

    if let Some(report_path) = &cli.report {
        match write_report(report_path, &merger, &stats, !cli.no_timestamp) {
            Ok(()) => println!("Report: {}", report_path.display()),
            Err(err) => eprintln!("Warning: failed to write report {}: {:#}", report_path.display(), err),
        }
    }

    Ok(())
}

/// The directory holding the running program.
fn default_root(program: Option<&std::path::Path>) -> Result<PathBuf> {
    let program = program.context(
        "Cannot detect the program location; pass the directory to merge explicitly",
    )?;
    println!("Program path detected as: {}", program.display());
    let folder = program
        .parent()
        .with_context(|| format!("Program path has no parent directory: {}", program.display()))?;
    Ok(folder.to_path_buf())
}

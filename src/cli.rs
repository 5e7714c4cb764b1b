//! Command-line interface definitions for mp3prune.
//!
//! This module defines all CLI arguments and options using the clap derive API.
//! There are no subcommands: every positional argument is a directory to prune.
//!
//! # Example
//!
//! ```bash
//! # Prune the current directory by content
//! mp3prune
//!
//! # Prune two albums, keeping the oldest copy of each track number
//! mp3prune --strategy track ~/Music/AlbumOne ~/Music/AlbumTwo
//!
//! # See what would survive without deleting anything
//! mp3prune --dry-run --output json ~/Music/AlbumOne
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Remove duplicate MP3 files, keeping the oldest copy of each.
///
/// Each directory is processed on its own: its `*.mp3` files are grouped by
/// the chosen strategy and every group is reduced to its earliest-modified
/// member. Sub-directories are not entered.
#[derive(Debug, Parser)]
#[command(name = "mp3prune")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Grouping strategy: content-hash, track-number, all-files or passthrough
    ///
    /// Unknown names fall back to passthrough, which deletes nothing.
    /// Overrides the `strategy` configuration key.
    #[arg(short, long, value_name = "NAME")]
    pub strategy: Option<String>,

    /// Report what would survive without deleting anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Number of I/O threads for hashing (default: 4)
    ///
    /// Lower values reduce disk thrashing on HDDs.
    #[arg(long, value_name = "N")]
    pub io_threads: Option<usize>,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Directories to process (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One block per input path: the directory name, then the surviving files
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

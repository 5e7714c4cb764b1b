//! JSON output formatter for deduplication results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "results": [
//!     {
//!       "status": "directory",
//!       "directory": "/music/Album",
//!       "name": "Album",
//!       "strategy": "content-hash",
//!       "dry_run": false,
//!       "saved": [{ "path": "/music/Album/01 Song.mp3", "modified": "2024-01-01T00:00:00Z" }],
//!       "removed": [{ "path": "/music/Album/01 Song (1).mp3", "size": 4096 }],
//!       "failures": [],
//!       "unreadable": []
//!     },
//!     { "status": "skipped", "path": "notes.txt" }
//!   ],
//!   "summary": { "directories": 1, "saved": 1, "removed": 1, "bytes_removed": 4096,
//!                "failures": 0, "unreadable": 0, "exit_code": 0, "exit_code_name": "MP3000" }
//! }
//! ```

use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::PathReport;
use crate::actions::delete::{DeleteFailure, DeleteResult};
use crate::duplicates::{GroupingStrategy, UnreadableFile};
use crate::error::ExitCode;
use crate::scanner::FileRecord;

/// A surviving file in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSavedFile {
    /// Canonical path
    pub path: PathBuf,
    /// Modification time (UTC)
    pub modified: DateTime<Utc>,
}

impl From<&FileRecord> for JsonSavedFile {
    fn from(record: &FileRecord) -> Self {
        Self {
            path: record.path.clone(),
            modified: DateTime::<Utc>::from(record.modified),
        }
    }
}

/// The result for one input path in JSON format.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JsonPathReport {
    /// The path was a directory and the pass ran.
    Directory {
        directory: PathBuf,
        name: String,
        strategy: GroupingStrategy,
        dry_run: bool,
        saved: Vec<JsonSavedFile>,
        removed: Vec<DeleteResult>,
        failures: Vec<DeleteFailure>,
        unreadable: Vec<UnreadableFile>,
    },
    /// The path was not a directory.
    Skipped { path: PathBuf },
    /// The directory could not be listed.
    Failed { path: PathBuf, message: String },
}

impl From<&PathReport> for JsonPathReport {
    fn from(report: &PathReport) -> Self {
        match report {
            PathReport::Directory(dir) => Self::Directory {
                directory: dir.directory.clone(),
                name: dir.name.clone(),
                strategy: dir.strategy,
                dry_run: dir.dry_run,
                saved: dir.saved.iter().map(JsonSavedFile::from).collect(),
                removed: dir.removed.clone(),
                failures: dir.failures.clone(),
                unreadable: dir.unreadable.clone(),
            },
            PathReport::Skipped { path } => Self::Skipped { path: path.clone() },
            PathReport::Failed { path, message } => Self::Failed {
                path: path.clone(),
                message: message.clone(),
            },
        }
    }
}

/// Totals across all input paths.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JsonSummary {
    /// Directories processed
    pub directories: usize,
    /// Surviving files
    pub saved: usize,
    /// Files removed (or that would be removed in a dry run)
    pub removed: usize,
    /// Bytes removed
    pub bytes_removed: u64,
    /// Failed deletions
    pub failures: usize,
    /// Unreadable files
    pub unreadable: usize,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "MP3000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Tally the reports.
    #[must_use]
    pub fn from_reports(reports: &[PathReport], exit_code: ExitCode) -> Self {
        let mut summary = Self {
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
            ..Self::default()
        };
        for report in reports {
            if let PathReport::Directory(dir) = report {
                summary.directories += 1;
                summary.saved += dir.saved.len();
                summary.removed += dir.removed.len();
                summary.bytes_removed += dir.removed.iter().map(|r| r.size).sum::<u64>();
                summary.failures += dir.failures.len();
                summary.unreadable += dir.unreadable.len();
            }
        }
        summary
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// One entry per input path, in input order
    pub results: Vec<JsonPathReport>,
    /// Totals
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the JSON output from per-path reports and the exit code.
    #[must_use]
    pub fn new(reports: &[PathReport], exit_code: ExitCode) -> Self {
        Self {
            results: reports.iter().map(JsonPathReport::from).collect(),
            summary: JsonSummary::from_reports(reports, exit_code),
        }
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), JsonOutputError> {
        let json = self.to_json_pretty()?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}

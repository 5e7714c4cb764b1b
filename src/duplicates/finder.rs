//! The deduplication pass for a single directory.
//!
//! # Overview
//!
//! [`Deduplicator::run`] drives one directory through the whole pass:
//! 1. **List**: collect `*.mp3` candidates (see [`crate::scanner::walker`])
//! 2. **Group**: compute every key and build the group table
//! 3. **Select**: order each group and pick its earliest member
//! 4. **Delete**: unlink every other member, recording failures
//! 5. **Report**: return survivors sorted by path
//!
//! Deletion for a directory starts only after step 2 has finished for all
//! of its files.
//!
//! [`Deduplicator::process_records`] runs steps 2-5 on an already-resolved
//! listing and knows nothing about directories or default arguments.
//!
//! # Example
//!
//! ```no_run
//! use mp3prune::duplicates::{DedupeConfig, Deduplicator, GroupingStrategy};
//! use std::path::Path;
//!
//! let config = DedupeConfig::default().with_strategy(GroupingStrategy::TrackNumber);
//! let report = Deduplicator::new(config).run(Path::new("/music/album")).unwrap();
//! for record in &report.saved {
//!     println!("{}", record.path.display());
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use super::groups::build_groups;
use super::strategy::GroupingStrategy;
use crate::actions::delete::{
    delete_batch, validate_preserves_copy, DeleteFailure, DeleteResult, Remover, UnlinkRemover,
};
use crate::scanner::{list_candidates, FileRecord, FsMetadata, Hasher, MetadataSource, ScanError};

/// Configuration for a deduplication pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupeConfig {
    /// How files are grouped.
    pub strategy: GroupingStrategy,
    /// Number of threads for content hashing.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
    /// Report survivors without deleting anything.
    pub dry_run: bool,
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self {
            strategy: GroupingStrategy::default(),
            io_threads: 4,
            dry_run: false,
        }
    }
}

impl DedupeConfig {
    /// Set the grouping strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: GroupingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the number of hashing threads (minimum 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Enable or disable dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// A file left out of grouping because it could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreadableFile {
    /// Path of the file
    pub path: PathBuf,
    /// Why it could not be read
    pub message: String,
}

/// Steps 2-5 of the pass, independent of any directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassOutcome {
    /// One survivor per group, sorted by path
    pub saved: Vec<FileRecord>,
    /// Files removed (or, in a dry run, that would be removed)
    pub removed: Vec<DeleteResult>,
    /// Files that could not be removed
    pub failures: Vec<DeleteFailure>,
    /// Files excluded because their key could not be computed
    pub unreadable: Vec<UnreadableFile>,
}

/// Result of running the pass on one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryReport {
    /// Canonical path of the directory
    pub directory: PathBuf,
    /// Display name: the directory's base name
    pub name: String,
    /// Strategy used for grouping
    pub strategy: GroupingStrategy,
    /// Whether deletions were skipped
    pub dry_run: bool,
    /// One survivor per group, sorted by path
    pub saved: Vec<FileRecord>,
    /// Files removed (or, in a dry run, that would be removed)
    pub removed: Vec<DeleteResult>,
    /// Files that could not be removed
    pub failures: Vec<DeleteFailure>,
    /// Files skipped because they could not be read
    pub unreadable: Vec<UnreadableFile>,
}

impl DirectoryReport {
    /// Check whether anything went wrong during the pass.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty() || !self.unreadable.is_empty()
    }

    /// Paths of the surviving files, in report order.
    #[must_use]
    pub fn saved_paths(&self) -> Vec<&Path> {
        self.saved.iter().map(|r| r.path.as_path()).collect()
    }
}

/// Runs the grouping and deletion pass.
///
/// The metadata source and deletion backend are injectable; by default the
/// real filesystem is used for both.
#[derive(Clone)]
pub struct Deduplicator {
    config: DedupeConfig,
    hasher: Hasher,
    metadata: Arc<dyn MetadataSource>,
    remover: Arc<dyn Remover>,
}

impl std::fmt::Debug for Deduplicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deduplicator")
            .field("config", &self.config)
            .field("hasher", &self.hasher)
            .field("metadata", &"<metadata source>")
            .field("remover", &"<remover>")
            .finish()
    }
}

impl Deduplicator {
    /// Create a deduplicator backed by the real filesystem.
    #[must_use]
    pub fn new(config: DedupeConfig) -> Self {
        Self {
            config,
            hasher: Hasher::new(),
            metadata: Arc::new(FsMetadata),
            remover: Arc::new(UnlinkRemover),
        }
    }

    /// Create a deduplicator with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DedupeConfig::default())
    }

    /// Replace the source of modification times.
    #[must_use]
    pub fn with_metadata_source(mut self, metadata: Arc<dyn MetadataSource>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Replace the deletion backend.
    #[must_use]
    pub fn with_remover(mut self, remover: Arc<dyn Remover>) -> Self {
        self.remover = remover;
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &DedupeConfig {
        &self.config
    }

    /// Run the pass on one directory.
    ///
    /// Unreadable files and failed deletions are recorded in the report;
    /// they do not abort the pass.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] if `dir` is not a directory or cannot be
    /// listed.
    pub fn run(&self, dir: &Path) -> Result<DirectoryReport, ScanError> {
        let listing = list_candidates(dir, self.metadata.as_ref())?;
        log::info!(
            "Scanning {} ({} file(s), strategy {})",
            listing.directory.display(),
            listing.records.len(),
            self.config.strategy
        );

        let mut outcome = self.process_records(listing.records);

        let mut unreadable: Vec<UnreadableFile> = listing
            .unreadable
            .iter()
            .map(|e| UnreadableFile {
                path: e.path().to_path_buf(),
                message: e.to_string(),
            })
            .collect();
        unreadable.append(&mut outcome.unreadable);
        unreadable.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(DirectoryReport {
            name: display_name(&listing.directory),
            directory: listing.directory,
            strategy: self.config.strategy,
            dry_run: self.config.dry_run,
            saved: outcome.saved,
            removed: outcome.removed,
            failures: outcome.failures,
            unreadable,
        })
    }

    /// Group, select and delete over an already-resolved listing.
    #[must_use]
    pub fn process_records(&self, records: Vec<FileRecord>) -> PassOutcome {
        let grouping = build_groups(
            records,
            self.config.strategy,
            &self.hasher,
            self.config.io_threads,
        );

        let mut outcome = PassOutcome {
            unreadable: grouping
                .unreadable
                .iter()
                .map(|e| UnreadableFile {
                    path: e.path().to_path_buf(),
                    message: e.to_string(),
                })
                .collect(),
            ..PassOutcome::default()
        };

        for selection in grouping.table.select_survivors() {
            let doomed: Vec<PathBuf> = selection.remove.iter().map(|r| r.path.clone()).collect();

            if !doomed.is_empty() {
                let mut members = doomed.clone();
                members.push(selection.keep.path.clone());
                if let Err(e) = validate_preserves_copy(&doomed, &members) {
                    log::error!("Refusing to process group '{}': {}", selection.key, e);
                    let message = e.to_string();
                    outcome
                        .failures
                        .extend(doomed.into_iter().map(|path| DeleteFailure {
                            path,
                            message: message.clone(),
                        }));
                } else if self.config.dry_run {
                    for path in doomed {
                        log::info!("Would delete: {}", path.display());
                        let size = match fs::metadata(&path) {
                            Ok(meta) => meta.len(),
                            Err(e) => {
                                log::debug!("Cannot size {}: {}", path.display(), e);
                                0
                            }
                        };
                        outcome.removed.push(DeleteResult::new(path, size));
                    }
                } else {
                    let batch = delete_batch(&doomed, self.remover.as_ref());
                    outcome.removed.extend(batch.successes);
                    outcome.failures.extend(batch.failures);
                }
            }

            outcome.saved.push(selection.keep);
        }

        outcome.saved.sort_by(|a, b| a.path.cmp(&b.path));
        outcome
    }
}

/// Base name of a directory, or the whole path when it has none (e.g. `/`).
fn display_name(directory: &Path) -> String {
    directory
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| directory.display().to_string())
}

//! Permanent file deletion.
//!
//! # Overview
//!
//! This module removes surplus copies with a direct unlink:
//! - Single-file permanent deletion with typed errors
//! - Batch deletion that records failures and keeps going
//! - A [`Remover`] seam so callers can substitute the deletion backend
//!
//! # Safety
//!
//! Nothing is moved to a trash and nothing can be undone. Callers are
//! expected to pass only non-surviving group members; [`validate_preserves_copy`]
//! checks that a selection leaves at least one file behind.
//!
//! # Example
//!
//! ```no_run
//! use mp3prune::actions::delete::{delete_batch, UnlinkRemover};
//! use std::path::PathBuf;
//!
//! let paths = vec![PathBuf::from("/music/02 Song (copy).mp3")];
//! let result = delete_batch(&paths, &UnlinkRemover);
//! println!("{}", result.summary());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Attempted to delete all copies (at least one must be preserved).
    #[error("cannot delete all copies - at least one file must be preserved")]
    AllCopiesWouldBeDeleted,

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Classify an I/O error for `path`.
    #[must_use]
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Result of a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes.
    pub size: u64,
}

impl DeleteResult {
    /// Create a new delete result.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// A file that could not be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteFailure {
    /// Path that was not deleted.
    pub path: PathBuf,
    /// Why the deletion failed.
    pub message: String,
}

/// Results of a batch deletion.
#[derive(Debug, Clone, Default)]
pub struct BatchDeleteResult {
    /// Successfully deleted files.
    pub successes: Vec<DeleteResult>,
    /// Failed deletions with their errors.
    pub failures: Vec<DeleteFailure>,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

impl BatchDeleteResult {
    /// Number of successful deletions.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Total number of attempted deletions.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Check if all deletions succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!(
                "Deleted {} file(s), freed {} bytes",
                self.success_count(),
                self.bytes_freed
            )
        } else {
            format!(
                "Deleted {} file(s), {} failed, freed {} bytes",
                self.success_count(),
                self.failure_count(),
                self.bytes_freed
            )
        }
    }
}

/// Deletion backend.
pub trait Remover: Send + Sync {
    /// Remove a single file.
    ///
    /// # Errors
    ///
    /// Returns a [`DeleteError`] if the file could not be removed.
    fn remove(&self, path: &Path) -> Result<DeleteResult, DeleteError>;
}

/// [`Remover`] that unlinks files with [`permanent_delete`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnlinkRemover;

impl Remover for UnlinkRemover {
    fn remove(&self, path: &Path) -> Result<DeleteResult, DeleteError> {
        permanent_delete(path)
    }
}

/// Permanently delete a single file.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if deletion is not allowed
/// - `Io` for any other failure
///
/// # Example
///
/// ```no_run
/// use mp3prune::actions::delete::permanent_delete;
/// use std::path::Path;
///
/// match permanent_delete(Path::new("/music/copy.mp3")) {
///     Ok(result) => println!("Deleted {} ({} bytes)", result.path.display(), result.size),
///     Err(e) => eprintln!("Failed: {}", e),
/// }
/// ```
pub fn permanent_delete(path: &Path) -> Result<DeleteResult, DeleteError> {
    // Get file size before deletion
    let metadata = fs::metadata(path).map_err(|e| DeleteError::from_io(path, e))?;
    let size = metadata.len();

    fs::remove_file(path).map_err(|e| {
        log::error!("Permanent delete failed for {}: {}", path.display(), e);
        DeleteError::from_io(path, e)
    })?;

    log::info!("Deleted: {} ({} bytes)", path.display(), size);

    Ok(DeleteResult::new(path.to_path_buf(), size))
}

/// Delete multiple files, continuing past failures.
///
/// Each path is attempted exactly once; there is no retry and no rollback
/// of files already removed.
///
/// # Example
///
/// ```no_run
/// use mp3prune::actions::delete::{delete_batch, UnlinkRemover};
/// use std::path::PathBuf;
///
/// let paths = vec![PathBuf::from("/dup1.mp3"), PathBuf::from("/dup2.mp3")];
/// let result = delete_batch(&paths, &UnlinkRemover);
/// assert_eq!(result.total_count(), 2);
/// ```
pub fn delete_batch(paths: &[PathBuf], remover: &dyn Remover) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();

    for path in paths {
        match remover.remove(path) {
            Ok(del) => {
                result.bytes_freed += del.size;
                result.successes.push(del);
            }
            Err(e) => {
                log::warn!("Failed to delete {}: {}", path.display(), e);
                result.failures.push(DeleteFailure {
                    path: path.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    if result.total_count() > 0 {
        log::debug!("{}", result.summary());
    }

    result
}

/// Validate that a selection doesn't delete all copies.
///
/// # Errors
///
/// Returns `AllCopiesWouldBeDeleted` if every path of the group is selected.
///
/// # Example
///
/// ```
/// use mp3prune::actions::delete::validate_preserves_copy;
/// use std::path::PathBuf;
///
/// let group = vec![PathBuf::from("/a.mp3"), PathBuf::from("/b.mp3")];
/// assert!(validate_preserves_copy(&group[1..], &group).is_ok());
/// assert!(validate_preserves_copy(&group, &group).is_err());
/// ```
pub fn validate_preserves_copy(
    selected_paths: &[PathBuf],
    group_paths: &[PathBuf],
) -> Result<(), DeleteError> {
    use std::collections::HashSet;

    let selected_set: HashSet<&PathBuf> = selected_paths.iter().collect();
    let preserved_count = group_paths
        .iter()
        .filter(|p| !selected_set.contains(p))
        .count();

    if preserved_count == 0 && !group_paths.is_empty() {
        log::error!(
            "Attempted to delete all {} copies of a group",
            group_paths.len()
        );
        Err(DeleteError::AllCopiesWouldBeDeleted)
    } else {
        Ok(())
    }
}

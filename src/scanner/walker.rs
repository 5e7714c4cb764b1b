//! Flat directory listing using walkdir.
//!
//! # Overview
//!
//! This module lists the `*.mp3` candidates of a single directory. It never
//! descends into sub-directories. Matching follows shell glob rules for
//! `*.mp3`:
//!
//! - the name ends with `.mp3` (case-sensitive)
//! - the name does not start with `.` (`*` never matches a leading dot)
//! - the entry resolves to a regular file (symlinks are followed)
//!
//! Every accepted entry is canonicalized and paired with its modification
//! time from the supplied [`MetadataSource`].
//!
//! # Example
//!
//! ```no_run
//! use mp3prune::scanner::{list_candidates, FsMetadata};
//! use std::path::Path;
//!
//! let listing = list_candidates(Path::new("/music/album"), &FsMetadata).unwrap();
//! println!("{} candidates in {}", listing.records.len(), listing.directory.display());
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileRecord, MetadataSource, ScanError};

/// File name suffix accepted by the listing.
pub const MP3_EXTENSION: &str = ".mp3";

/// Result of listing one directory.
#[derive(Debug)]
pub struct Listing {
    /// Canonical path of the listed directory
    pub directory: PathBuf,
    /// Accepted candidates, in file-name order
    pub records: Vec<FileRecord>,
    /// Candidates whose metadata or canonical path could not be read
    pub unreadable: Vec<ScanError>,
}

/// Check whether a bare file name matches the `*.mp3` pattern.
#[must_use]
pub fn is_candidate_name(name: &str) -> bool {
    !name.starts_with('.') && name.ends_with(MP3_EXTENSION)
}

/// List the `*.mp3` files directly inside `dir`.
///
/// Per-entry failures are collected in [`Listing::unreadable`] instead of
/// aborting the listing.
///
/// # Errors
///
/// - `NotADirectory` if `dir` is not a directory
/// - `NotFound` / `PermissionDenied` / `Io` if the directory itself cannot
///   be resolved or read
pub fn list_candidates(dir: &Path, metadata: &dyn MetadataSource) -> Result<Listing, ScanError> {
    let directory = fs::canonicalize(dir).map_err(|e| ScanError::from_io(dir, e))?;
    if !directory.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let mut records = Vec::new();
    let mut unreadable = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    let walk = WalkDir::new(&directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walk {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                let path = e.path().unwrap_or(directory.as_path()).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                return Err(ScanError::from_io(&path, source));
            }
            Err(e) => {
                let path = e.path().unwrap_or(directory.as_path()).to_path_buf();
                log::warn!("Failed to read entry in {}: {}", directory.display(), e);
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory entry unreadable"));
                unreadable.push(ScanError::from_io(&path, source));
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy();
        if !is_candidate_name(&name) {
            log::trace!("Skipping non-candidate: {}", entry.path().display());
            continue;
        }

        match resolve_candidate(entry.path(), metadata) {
            Ok(Some(record)) => {
                // Two names resolving to one file must not end up in the same group
                if !seen.insert(record.path.clone()) {
                    log::debug!(
                        "Skipping alias {} of {}",
                        entry.path().display(),
                        record.path.display()
                    );
                    continue;
                }
                log::trace!("Candidate: {}", record.path.display());
                records.push(record);
            }
            Ok(None) => log::trace!("Skipping non-file: {}", entry.path().display()),
            Err(e) => {
                log::warn!("Skipping unreadable file: {}", e);
                unreadable.push(e);
            }
        }
    }

    log::debug!(
        "Listed {} candidate(s) in {} ({} unreadable)",
        records.len(),
        directory.display(),
        unreadable.len()
    );

    Ok(Listing {
        directory,
        records,
        unreadable,
    })
}

/// Resolve an entry to a [`FileRecord`], or `None` if it is not a regular file.
fn resolve_candidate(
    path: &Path,
    metadata: &dyn MetadataSource,
) -> Result<Option<FileRecord>, ScanError> {
    let meta = fs::metadata(path).map_err(|e| ScanError::from_io(path, e))?;
    if !meta.is_file() {
        return Ok(None);
    }

    let canonical = fs::canonicalize(path).map_err(|e| ScanError::from_io(path, e))?;
    let modified = metadata
        .modified(&canonical)
        .map_err(|e| ScanError::from_io(&canonical, e))?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Some(FileRecord::new(modified, canonical).with_name(name)))
}

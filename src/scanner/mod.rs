//! Scanner module for directory listing and file hashing.
//!
//! This module provides functionality for:
//! - Flat (single-level) listing of `*.mp3` candidates using walkdir
//! - Content hashing with BLAKE3
//! - Modification-time lookup through an injectable [`MetadataSource`]
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory listing and candidate discovery
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use mp3prune::scanner::{list_candidates, FsMetadata};
//! use std::path::Path;
//!
//! let listing = list_candidates(Path::new("."), &FsMetadata).unwrap();
//! for record in &listing.records {
//!     println!("{}", record.path.display());
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

// Re-export main types
pub use hasher::{hash_to_hex, Hash, Hasher};
pub use walker::{list_candidates, Listing, MP3_EXTENSION};

/// A candidate file: its modification time, canonical path and listed name.
///
/// Records order by modification time first and canonical path second, so
/// two files touched in the same instant still sort deterministically
/// (lexicographic, component-wise path order).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileRecord {
    /// Last modification time
    pub modified: SystemTime,
    /// Canonical absolute path to the file
    pub path: PathBuf,
    /// Name of the directory entry that matched `*.mp3`. Differs from the
    /// final component of `path` when the entry is a symlink.
    pub name: String,
}

impl FileRecord {
    /// Create a new FileRecord named after the final component of `path`.
    #[must_use]
    pub fn new(modified: SystemTime, path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            modified,
            path,
            name,
        }
    }

    /// Replace the listed name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The name the file was listed under.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.name
    }
}

/// Source of file modification times.
///
/// Production code reads the filesystem through [`FsMetadata`]; tests can
/// substitute fixed timestamps to make ordering reproducible.
pub trait MetadataSource: Send + Sync {
    /// Return the modification time of `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the metadata cannot be read.
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;
}

/// [`MetadataSource`] backed by `std::fs::metadata`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMetadata;

impl MetadataSource for FsMetadata {
    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        fs::metadata(path)?.modified()
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// The path this error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(p) | Self::NotFound(p) | Self::NotADirectory(p) => p,
            Self::Io { path, .. } => path,
        }
    }

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

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl HashError {
    /// The path this error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) => p,
            Self::Io { path, .. } => path,
        }
    }

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

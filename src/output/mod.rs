//! Output formatters for deduplication results.
//!
//! This module provides different output formats:
//! - Plain text, one block per input path (the default)
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```
//! use mp3prune::output::{text, PathReport};
//! use std::path::PathBuf;
//!
//! let reports = vec![PathReport::Skipped { path: PathBuf::from("notes.txt") }];
//! let mut out = Vec::new();
//! text::write_text(&mut out, &reports).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "(Skipping notes.txt: not a directory)\n\n");
//! ```

pub mod json;
pub mod text;

use std::path::PathBuf;

use crate::duplicates::DirectoryReport;

// Re-export main types
pub use json::JsonOutput;

/// What happened to one input path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathReport {
    /// The path was a directory and the pass ran.
    Directory(DirectoryReport),
    /// The path was not a directory; nothing was touched.
    Skipped {
        /// The path as given
        path: PathBuf,
    },
    /// The directory could not be listed.
    Failed {
        /// The path as given
        path: PathBuf,
        /// Why listing failed
        message: String,
    },
}

impl PathReport {
    /// Check whether this path should make the run exit non-zero.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        match self {
            Self::Directory(dir) => dir.has_errors(),
            Self::Skipped { .. } => false,
            Self::Failed { .. } => true,
        }
    }
}

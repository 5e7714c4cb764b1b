//! Plain-text report.
//!
//! One block per input path, each followed by a blank line:
//!
//! ```text
//! [Album One]
//! /music/Album One/01 Song.mp3
//! /music/Album One/02 Other.mp3
//!
//! (Skipping notes.txt: not a directory)
//!
//! ```

use std::io::{self, Write};

use super::PathReport;

/// Write the block for a single input path.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_path_report<W: Write>(writer: &mut W, report: &PathReport) -> io::Result<()> {
    match report {
        PathReport::Directory(dir) => {
            writeln!(writer, "[{}]", dir.name)?;
            for path in dir.saved_paths() {
                writeln!(writer, "{}", path.display())?;
            }
        }
        PathReport::Skipped { path } => {
            writeln!(writer, "(Skipping {}: not a directory)", path.display())?;
        }
        PathReport::Failed { path, message } => {
            writeln!(writer, "(Failed {}: {})", path.display(), message)?;
        }
    }
    writeln!(writer)
}

/// Write the blocks for every input path, in order.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_text<W: Write>(writer: &mut W, reports: &[PathReport]) -> io::Result<()> {
    for report in reports {
        write_path_report(writer, report)?;
    }
    Ok(())
}

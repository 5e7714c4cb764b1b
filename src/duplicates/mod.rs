//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Grouping strategies (content hash, track number, all files, passthrough)
//! - Group table construction and survivor selection
//! - The per-directory deduplication pass

pub mod finder;
pub mod groups;
pub mod strategy;

// Re-export main types
pub use finder::{DedupeConfig, Deduplicator, DirectoryReport, PassOutcome, UnreadableFile};
pub use groups::{build_groups, GroupKey, GroupSelection, GroupTable, Grouping};
pub use strategy::{track_number_key, GroupingStrategy};

//! File actions module.
//!
//! This module provides permanent deletion of surplus copies:
//! - Direct unlink via [`permanent_delete`]
//! - Batch operations that report failures per file
//! - A [`Remover`] trait for substituting the deletion backend
//!
//! ```no_run
//! use mp3prune::actions::delete::permanent_delete;
//! use std::path::PathBuf;
//!
//! let path = PathBuf::from("/music/duplicate.mp3");
//! let result = permanent_delete(&path);
//! ```

pub mod delete;

// Re-export commonly used types
pub use delete::{
    delete_batch, permanent_delete, validate_preserves_copy, BatchDeleteResult, DeleteError,
    DeleteFailure, DeleteResult, Remover, UnlinkRemover,
};

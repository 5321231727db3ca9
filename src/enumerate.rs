//! Candidate file enumeration.
//!
//! Produces the list of candidate files for one run, either as the
//! immediate children of a base directory or as a full recursive walk.
//! Paths are returned relative to the base directory so the directory
//! prefix of each candidate can be preserved in rendered destinations.
//! Both listings are pure reads; neither guarantees an ordering.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Errors that can occur while enumerating candidates.
#[derive(Debug)]
pub enum EnumerateError {
    /// The base directory could not be read.
    ReadDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// An entry inside the walk could not be accessed.
    WalkFailed { reason: String },
}

impl std::fmt::Display for EnumerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumerateError::ReadDirFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
            EnumerateError::WalkFailed { reason } => {
                write!(f, "Failed to walk directory tree: {}", reason)
            }
        }
    }
}

impl std::error::Error for EnumerateError {}

/// Result type for enumeration operations.
pub type EnumerateResult<T> = Result<T, EnumerateError>;

/// Lists the immediate file children of `base`.
///
/// Directories are skipped; each returned path is just the filename,
/// relative to `base`. Iteration order is whatever the host filesystem
/// yields.
pub fn list_immediate(base: &Path) -> EnumerateResult<Vec<PathBuf>> {
    let entries = fs::read_dir(base).map_err(|e| EnumerateError::ReadDirFailed {
        path: base.to_path_buf(),
        source: e,
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| EnumerateError::ReadDirFailed {
            path: base.to_path_buf(),
            source: e,
        })?;
        let file_type = entry.file_type().map_err(|e| EnumerateError::ReadDirFailed {
            path: entry.path(),
            source: e,
        })?;
        if file_type.is_file() {
            candidates.push(PathBuf::from(entry.file_name()));
        }
    }
    Ok(candidates)
}

/// Walks the full subtree of `base`, yielding every file as a path
/// relative to `base`.
///
/// Depth-first; directories themselves are not yielded. Traversal order
/// within a directory is not guaranteed.
pub fn list_recursive(base: &Path) -> EnumerateResult<Vec<PathBuf>> {
    let mut candidates = Vec::new();
    for entry in WalkDir::new(base) {
        let entry = entry.map_err(|e| EnumerateError::WalkFailed {
            reason: e.to_string(),
        })?;
        if entry.file_type().is_file() {
            let relative = entry
                .path()
                .strip_prefix(base)
                .expect("walkdir entries are rooted at base");
            candidates.push(relative.to_path_buf());
        }
    }
    Ok(candidates)
}

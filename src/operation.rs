//! The closed set of batch operations and their filesystem actions.
//!
//! Each operation kind carries three facts: whether it needs a destination
//! template, whether destination conflicts matter, and the terminal
//! filesystem action. Move and Copy pre-clean the destination before
//! acting; the pre-clean treats a missing destination as a no-op but
//! surfaces any other removal failure rather than absorbing it.

use std::fs;
use std::path::{Path, PathBuf};

/// The four batch operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Rename matching files to their rendered destinations.
    Move,
    /// Copy matching files to their rendered destinations, keeping sources.
    Copy,
    /// Remove matching files.
    Delete,
    /// Report matching files without touching the filesystem.
    List,
}

/// Errors that can occur while applying one effect.
#[derive(Debug)]
pub enum ApplyError {
    /// Removing a pre-existing destination failed for a reason other than
    /// the destination not existing.
    PreCleanFailed {
        destination: PathBuf,
        source: std::io::Error,
    },
    /// The terminal action (rename, copy, or remove) failed.
    ActionFailed {
        kind: OperationKind,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ApplyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplyError::PreCleanFailed {
                destination,
                source,
            } => {
                write!(
                    f,
                    "Failed to remove existing destination {}: {}",
                    destination.display(),
                    source
                )
            }
            ApplyError::ActionFailed { kind, path, source } => {
                write!(
                    f,
                    "Failed to {} {}: {}",
                    kind.verb().to_lowercase(),
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ApplyError {}

/// Result type for applying effects.
pub type ApplyResult<T> = Result<T, ApplyError>;

impl OperationKind {
    /// Whether this kind requires a destination template.
    pub fn needs_template(&self) -> bool {
        matches!(self, OperationKind::Move | OperationKind::Copy)
    }

    /// Whether existing-destination conflicts matter for this kind.
    ///
    /// Delete and List have no destination, so overwrite never triggers
    /// for them regardless of policy.
    pub fn tracks_overwrite(&self) -> bool {
        matches!(self, OperationKind::Move | OperationKind::Copy)
    }

    /// Whether this kind mutates the filesystem at all.
    pub fn mutates(&self) -> bool {
        !matches!(self, OperationKind::List)
    }

    /// Display verb for preview lines and messages.
    pub fn verb(&self) -> &'static str {
        match self {
            OperationKind::Move => "Move",
            OperationKind::Copy => "Copy",
            OperationKind::Delete => "Delete",
            OperationKind::List => "List",
        }
    }

    /// Past-tense verb for completion messages.
    pub fn past_verb(&self) -> &'static str {
        match self {
            OperationKind::Move => "moved",
            OperationKind::Copy => "copied",
            OperationKind::Delete => "deleted",
            OperationKind::List => "listed",
        }
    }

    /// Applies this kind's filesystem action to one effect.
    ///
    /// `destination` is present exactly when `needs_template()` is true;
    /// Delete ignores it and List is a no-op. Move and Copy first remove
    /// any file already at the destination so the subsequent rename/copy
    /// behaves identically across platforms.
    ///
    /// # Errors
    ///
    /// Returns `ApplyError::PreCleanFailed` if an existing destination
    /// could not be removed, or `ApplyError::ActionFailed` if the rename,
    /// copy, or remove itself fails. Errors are propagated, not retried.
    pub fn apply(&self, source: &Path, destination: Option<&Path>) -> ApplyResult<()> {
        match self {
            OperationKind::Move => {
                let destination = destination.expect("Move always renders a destination");
                pre_clean(destination)?;
                fs::rename(source, destination).map_err(|e| ApplyError::ActionFailed {
                    kind: *self,
                    path: source.to_path_buf(),
                    source: e,
                })
            }
            OperationKind::Copy => {
                let destination = destination.expect("Copy always renders a destination");
                pre_clean(destination)?;
                fs::copy(source, destination)
                    .map(|_| ())
                    .map_err(|e| ApplyError::ActionFailed {
                        kind: *self,
                        path: source.to_path_buf(),
                        source: e,
                    })
            }
            OperationKind::Delete => {
                fs::remove_file(source).map_err(|e| ApplyError::ActionFailed {
                    kind: *self,
                    path: source.to_path_buf(),
                    source: e,
                })
            }
            OperationKind::List => Ok(()),
        }
    }
}

/// Removes a pre-existing file at `destination`, tolerating "not found".
fn pre_clean(destination: &Path) -> ApplyResult<()> {
    match fs::remove_file(destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ApplyError::PreCleanFailed {
            destination: destination.to_path_buf(),
            source: e,
        }),
    }
}

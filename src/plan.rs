//! The match-plan-execute orchestrator.
//!
//! A `Plan` combines an operation kind, a compiled `PathTemplate`, an
//! overwrite policy, and a candidate snapshot taken once at construction.
//! `preview` and `execute` recompute the same filtered effect sequence
//! from those immutable inputs, so the effects shown before confirmation
//! are exactly the effects applied afterwards (same members, same order).
//! Recomputation costs one redundant existence check per candidate and
//! buys the guarantee that the two phases cannot diverge.

use crate::operation::{ApplyError, OperationKind};
use crate::template::PathTemplate;
use std::path::{Path, PathBuf};

/// One planned file operation: a matching candidate and its outcome.
///
/// Ephemeral; produced fresh by each call to [`Plan::preview`] and
/// recomputed inside [`Plan::execute`]. Paths are relative to the plan's
/// base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEffect {
    /// The matching candidate, directory prefix included.
    pub source: PathBuf,
    /// The rendered destination; `None` for Delete and List.
    pub destination: Option<PathBuf>,
    /// True when the destination already exists and the overwrite policy
    /// allows replacing it.
    pub overwrite: bool,
}

/// Errors that can occur while executing a plan.
#[derive(Debug)]
pub enum PlanError {
    /// Applying one effect failed; the remaining sequence was abandoned.
    /// Effects applied before the failure are not rolled back.
    ApplyFailed {
        source_path: PathBuf,
        source: ApplyError,
    },
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanError::ApplyFailed {
                source_path,
                source,
            } => {
                write!(
                    f,
                    "Aborted at {}: {}",
                    source_path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for PlanError {}

/// Result type for plan execution.
pub type PlanResult<T> = Result<T, PlanError>;

/// An immutable batch-operation plan over a fixed candidate snapshot.
pub struct Plan {
    kind: OperationKind,
    template: PathTemplate,
    /// Base directory all candidate paths are relative to.
    base: PathBuf,
    /// Candidate list enumerated once, before preview, and reused for
    /// execute. Not re-enumerated between phases, so concurrent external
    /// mutation cannot silently change the plan's membership.
    candidates: Vec<PathBuf>,
    /// When false, effects whose destination already exists are dropped
    /// from both preview and execute.
    overwrite_allowed: bool,
}

impl Plan {
    /// Builds a plan from its immutable inputs.
    pub fn new(
        kind: OperationKind,
        template: PathTemplate,
        base: PathBuf,
        candidates: Vec<PathBuf>,
        overwrite_allowed: bool,
    ) -> Self {
        Self {
            kind,
            template,
            base,
            candidates,
            overwrite_allowed,
        }
    }

    /// The operation kind this plan will perform.
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Computes the ordered effect sequence for this plan.
    ///
    /// For each candidate in snapshot order: skip it if its filename does
    /// not match the pattern; otherwise render its destination. A
    /// candidate whose destination already exists is dropped entirely
    /// when overwriting is disabled, or flagged as an overwrite when
    /// enabled. Delete and List render no destination, so every match
    /// produces an effect for them.
    ///
    /// An empty result means "no matches": the run terminates early
    /// without confirmation, whatever the kind.
    pub fn preview(&self) -> Vec<PlannedEffect> {
        let mut effects = Vec::new();
        for candidate in &self.candidates {
            let Some(name) = candidate.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(groups) = self.template.matches(name) else {
                continue;
            };
            let directory = candidate.parent().unwrap_or_else(|| Path::new(""));
            let destination = self.template.render(directory, &groups);

            let overwrite = match &destination {
                Some(dest) => {
                    let exists = self.base.join(dest).exists();
                    if exists && !self.overwrite_allowed {
                        continue;
                    }
                    exists
                }
                None => false,
            };

            effects.push(PlannedEffect {
                source: candidate.clone(),
                destination,
                overwrite,
            });
        }
        effects
    }

    /// Recomputes the effect sequence and applies each effect in order.
    ///
    /// Calls `progress` after each successful apply (the CLI drives a
    /// progress bar with it). Effects are independent of one another, but
    /// two sources rendering to the same destination will collide: the
    /// later apply's pre-clean removes the earlier apply's output. That
    /// ordering-dependent collision is an accepted hazard of the design,
    /// not something execute resolves.
    ///
    /// # Errors
    ///
    /// The first failing apply aborts the remaining sequence; completed
    /// effects stay applied. There is no retry and no rollback.
    pub fn execute<F: FnMut()>(&self, mut progress: F) -> PlanResult<usize> {
        let effects = self.preview();
        let mut applied = 0;
        for effect in &effects {
            let source = self.base.join(&effect.source);
            let destination = effect.destination.as_ref().map(|d| self.base.join(d));
            self.kind
                .apply(&source, destination.as_deref())
                .map_err(|e| PlanError::ApplyFailed {
                    source_path: effect.source.clone(),
                    source: e,
                })?;
            applied += 1;
            progress();
        }
        Ok(applied)
    }
}

//! refile - batch file operations driven by regular expressions
//!
//! This library finds files whose names match a regular expression and
//! performs a batch operation on them: move, copy, delete, or list. For
//! move and copy, capture groups from the match fill a destination-name
//! template, enabling pattern-based bulk renaming. Every run previews its
//! effects and gates execution behind confirmation unless forced.

pub mod cli;
pub mod config;
pub mod confirm;
pub mod enumerate;
pub mod operation;
pub mod output;
pub mod plan;
pub mod template;

pub use config::{ConfigError, ToolConfig};
pub use confirm::{ConfirmationGate, ScriptedConfirmation, StdinConfirmation};
pub use operation::OperationKind;
pub use plan::{Plan, PlannedEffect};
pub use template::{PathTemplate, TemplateError};

pub use cli::{Cli, RunConfig, RunOutcome, run, run_with_gate};

//! Command-line interface module for refile.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and validation
//! - Merging command-line flags with file-supplied defaults
//! - The preview → confirm → execute run sequence
//! - Candidate filtering and exclusion

use crate::config::ToolConfig;
use crate::confirm::{ConfirmationGate, StdinConfirmation};
use crate::enumerate;
use crate::operation::OperationKind;
use crate::output::OutputFormatter;
use crate::plan::Plan;
use crate::template::PathTemplate;
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;

/// Batch move, copy, delete, or list files matching a regular expression.
///
/// The pattern matches at the start of each filename. For move and copy,
/// capture groups fill the positional placeholders of the destination
/// template (`{}` for the next group, `{n}` for group n).
#[derive(Debug, Parser)]
#[command(name = "refile", version)]
pub struct Cli {
    /// Recurse into subdirectories (default: immediate children only).
    #[arg(short = 'r', global = true)]
    pub recursive: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'f', global = true)]
    pub force: bool,

    /// Explicit defaults-file path.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base directory to operate in (default: current directory).
    #[arg(long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// The four subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Move files matching a regex to templated destinations.
    #[command(name = "m")]
    Move {
        /// Input regex.
        #[arg(value_name = "from")]
        from: String,
        /// Output template filled from capture groups.
        #[arg(value_name = "to")]
        to: String,
        /// Skip files whose destination already exists.
        #[arg(short = 'n')]
        no_overwrite: bool,
    },
    /// Copy files matching a regex to templated destinations.
    #[command(name = "c")]
    Copy {
        /// Input regex.
        #[arg(value_name = "from")]
        from: String,
        /// Output template filled from capture groups.
        #[arg(value_name = "to")]
        to: String,
        /// Skip files whose destination already exists.
        #[arg(short = 'n')]
        no_overwrite: bool,
    },
    /// Delete files matching a regex.
    #[command(name = "d")]
    Delete {
        /// Input regex.
        #[arg(value_name = "file")]
        file: String,
    },
    /// List files matching a regex without touching them.
    #[command(name = "l")]
    List {
        /// Input regex.
        #[arg(value_name = "file")]
        file: String,
    },
}

/// The immutable configuration of one run.
///
/// Built once from the parsed command line merged with file-supplied
/// defaults, then passed by reference through the run — there is no
/// process-wide mutable state.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Which batch operation to perform.
    pub kind: OperationKind,
    /// The user-supplied pattern, compiled later by `PathTemplate`.
    pub pattern: String,
    /// Destination template; present exactly for Move and Copy.
    pub template: Option<String>,
    /// Enumerate recursively instead of immediate children only.
    pub recursive: bool,
    /// Skip the confirmation gate.
    pub force: bool,
    /// Whether effects may replace existing destinations.
    pub overwrite: bool,
    /// Base directory all candidate paths are relative to.
    pub base: PathBuf,
    /// Exact filenames dropped from the candidate list before matching.
    pub exclude: HashSet<String>,
}

impl RunConfig {
    /// Merges parsed arguments with file-supplied defaults.
    ///
    /// Boolean flags are sticky: a flag set on the command line or in
    /// the defaults file turns the behavior on. `-n` always disables
    /// overwriting, whatever the file says; Delete and List carry no
    /// destination, so their overwrite value is never consulted.
    pub fn from_cli(cli: &Cli, config: &ToolConfig) -> Self {
        let (kind, pattern, template, no_overwrite) = match &cli.command {
            Command::Move {
                from,
                to,
                no_overwrite,
            } => (OperationKind::Move, from, Some(to.clone()), *no_overwrite),
            Command::Copy {
                from,
                to,
                no_overwrite,
            } => (OperationKind::Copy, from, Some(to.clone()), *no_overwrite),
            Command::Delete { file } => (OperationKind::Delete, file, None, false),
            Command::List { file } => (OperationKind::List, file, None, false),
        };

        Self {
            kind,
            pattern: pattern.clone(),
            template,
            recursive: cli.recursive || config.defaults.recursive,
            force: cli.force || config.defaults.force,
            overwrite: !no_overwrite && config.defaults.overwrite,
            base: cli.dir.clone().unwrap_or_else(|| PathBuf::from(".")),
            exclude: config.exclude_set(),
        }
    }
}

/// How a run ended. Every variant is a success exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The operation set was executed.
    Completed { applied: usize },
    /// List showed its matches; nothing further to do.
    Listed { matches: usize },
    /// No candidate matched; nothing was previewed or asked.
    NoMatches,
    /// The confirmation gate declined; nothing was mutated.
    Declined,
}

/// Runs the CLI application with the parsed arguments.
///
/// Loads the defaults file, builds the immutable run configuration, and
/// drives the run with the interactive stdin confirmation gate.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use refile::cli::{Cli, run};
///
/// let cli = Cli::parse_from(["refile", "-f", "m", r"report(\d)\.csv", "archive_{0}.csv"]);
/// match run(cli) {
///     Ok(outcome) => println!("Finished: {:?}", outcome),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run(cli: Cli) -> Result<RunOutcome, String> {
    let config = ToolConfig::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let run_config = RunConfig::from_cli(&cli, &config);
    run_with_gate(&run_config, &mut StdinConfirmation)
}

/// Runs one configured batch operation against an injected gate.
///
/// This is the run's state machine: build → preview → (confirm) →
/// execute. Tests call it directly with a scripted gate to avoid
/// blocking on real input.
///
/// - Pattern and template are compiled first; a bad pattern or an
///   out-of-range group reference aborts here, before any enumeration.
/// - The candidate list is enumerated exactly once and reused for
///   execution.
/// - An empty effect set is a hard early exit ("no matches"), for every
///   kind including List.
/// - List terminates after its preview; it never asks for confirmation
///   and never applies anything.
/// - Otherwise the run executes iff forced or the gate answers yes.
pub fn run_with_gate(
    config: &RunConfig,
    gate: &mut dyn ConfirmationGate,
) -> Result<RunOutcome, String> {
    let template = PathTemplate::new(&config.pattern, config.template.as_deref())
        .map_err(|e| format!("Error: {}", e))?;

    let candidates = if config.recursive {
        enumerate::list_recursive(&config.base)
    } else {
        enumerate::list_immediate(&config.base)
    }
    .map_err(|e| format!("Error: {}", e))?;

    let candidates: Vec<PathBuf> = candidates
        .into_iter()
        .filter(|path| {
            path.file_name()
                .map(|name| !config.exclude.contains(&name.to_string_lossy().to_string()))
                .unwrap_or(true)
        })
        .collect();

    let plan = Plan::new(
        config.kind,
        template,
        config.base.clone(),
        candidates,
        config.overwrite,
    );

    let effects = plan.preview();
    if effects.is_empty() {
        OutputFormatter::info("No matches found.");
        return Ok(RunOutcome::NoMatches);
    }

    OutputFormatter::preview(config.kind, &effects);

    if config.kind == OperationKind::List {
        return Ok(RunOutcome::Listed {
            matches: effects.len(),
        });
    }

    // A decline prints nothing beyond what the preview already showed.
    let confirmed = config.force || gate.confirm();
    if !confirmed {
        return Ok(RunOutcome::Declined);
    }

    let pb = OutputFormatter::create_progress_bar(effects.len() as u64);
    let result = plan.execute(|| pb.inc(1));
    pb.finish_and_clear();

    match result {
        Ok(applied) => {
            OutputFormatter::success(&format!(
                "Done: {} file{} {}.",
                applied,
                if applied == 1 { "" } else { "s" },
                config.kind.past_verb()
            ));
            Ok(RunOutcome::Completed { applied })
        }
        Err(e) => Err(format!("Error: {}", e)),
    }
}

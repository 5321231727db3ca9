//! Output formatting and styling.
//!
//! Centralizes all terminal output: colored status messages, the preview
//! block shown before confirmation, and the progress bar used while a
//! batch executes. Keeping printing here leaves the planning modules
//! silent and directly testable.

use crate::operation::OperationKind;
use crate::plan::PlannedEffect;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Width of the rules framing the preview block.
const PREVIEW_RULE_WIDTH: usize = 35;

/// Manages all CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints the framed preview block for a run.
    ///
    /// Move/Copy lines read `Move: src -> dst`, Delete lines `Delete: src`,
    /// and List lines show just the matching path. Effects that will
    /// replace an existing file carry a yellow `(overwrite)` marker.
    pub fn preview(kind: OperationKind, effects: &[PlannedEffect]) {
        Self::rule();
        for effect in effects {
            Self::preview_line(kind, effect);
        }
        Self::rule();
    }

    fn rule() {
        println!("{}", "-".repeat(PREVIEW_RULE_WIDTH));
    }

    fn preview_line(kind: OperationKind, effect: &PlannedEffect) {
        let marker = if effect.overwrite {
            format!(" {}", "(overwrite)".yellow())
        } else {
            String::new()
        };
        match (&kind, &effect.destination) {
            (OperationKind::List, _) => println!("{}", effect.source.display()),
            (_, Some(destination)) => println!(
                "{}: {} -> {}{}",
                kind.verb().bold(),
                effect.source.display(),
                destination.display(),
                marker
            ),
            (_, None) => println!("{}: {}", kind.verb().bold(), effect.source.display()),
        }
    }

    /// Creates a progress bar sized for one execution batch.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }
}

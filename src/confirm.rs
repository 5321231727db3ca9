//! Confirmation gating for mutating runs.
//!
//! The orchestrator asks the gate exactly once, after the preview is
//! shown and only when the force flag is unset, there is at least one
//! effect, and the operation mutates the filesystem. Tests inject a
//! scripted gate instead of blocking on real input.

use std::io::{BufRead, Write};

/// Decides whether a previewed run may execute.
pub trait ConfirmationGate {
    /// Returns true to proceed, false to abort without mutation.
    fn confirm(&mut self) -> bool;
}

/// Interactive gate reading from stdin.
///
/// Accepts exactly the literal answers "y" and "n"; anything else
/// re-prompts indefinitely. Blocks until a valid answer arrives — there
/// is no timeout.
pub struct StdinConfirmation;

impl ConfirmationGate for StdinConfirmation {
    fn confirm(&mut self) -> bool {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            println!("Would you like to perform these changes (y/n)?");
            let _ = std::io::stdout().flush();
            line.clear();
            match stdin.lock().read_line(&mut line) {
                // EOF: treat as a decline rather than spinning forever.
                Ok(0) => return false,
                Ok(_) => match line.trim_end_matches(['\r', '\n']) {
                    "y" => return true,
                    "n" => return false,
                    _ => continue,
                },
                Err(_) => return false,
            }
        }
    }
}

/// Gate with a fixed, scripted answer.
pub struct ScriptedConfirmation {
    answer: bool,
    /// How many times `confirm` was called; lets tests assert the gate
    /// was (or was not) consulted.
    pub calls: usize,
}

impl ScriptedConfirmation {
    /// Creates a gate that always returns `answer`.
    pub fn new(answer: bool) -> Self {
        Self { answer, calls: 0 }
    }
}

impl ConfirmationGate for ScriptedConfirmation {
    fn confirm(&mut self) -> bool {
        self.calls += 1;
        self.answer
    }
}

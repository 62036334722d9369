//! # Command Evaluator
//!
//! The boundary between the line editor and whatever runs the finished
//! line. The editor hands over plain text and waits for evaluation to
//! return; it never sees how the line was parsed or executed.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::process::Command;

/// Trait for running a completed line
pub trait CommandEvaluator {
    fn evaluate(&mut self, line: &str) -> Result<()>;
}

/// Runs lines through `program -c line`
///
/// A leading word found in the alias table is replaced before the line is
/// handed to the program. The table is fixed at construction.
#[derive(Debug, Clone)]
pub struct SystemShellEvaluator {
    program: String,
    aliases: HashMap<String, String>,
}

impl SystemShellEvaluator {
    pub fn new(program: impl Into<String>, aliases: HashMap<String, String>) -> Self {
        Self {
            program: program.into(),
            aliases,
        }
    }

    /// Replace a leading alias with its expansion
    pub fn expand_aliases(&self, line: &str) -> String {
        let trimmed = line.trim_start();
        let word_end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        let (word, rest) = trimmed.split_at(word_end);
        match self.aliases.get(word) {
            Some(expansion) => format!("{expansion}{rest}"),
            None => line.to_string(),
        }
    }
}

impl CommandEvaluator for SystemShellEvaluator {
    fn evaluate(&mut self, line: &str) -> Result<()> {
        let expanded = self.expand_aliases(line);
        tracing::debug!("running {:?} via {}", expanded, self.program);

        let status = Command::new(&self.program)
            .arg("-c")
            .arg(&expanded)
            .status()
            .with_context(|| format!("failed to start {}", self.program))?;

        if !status.success() {
            tracing::warn!("command {:?} exited with {}", expanded, status);
        }
        Ok(())
    }
}

/// Evaluator that only remembers the lines it was given
#[derive(Debug, Default)]
pub struct RecordingEvaluator {
    lines: Vec<String>,
}

impl RecordingEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl CommandEvaluator for RecordingEvaluator {
    fn evaluate(&mut self, line: &str) -> Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

//! # Completion Providers
//!
//! Insert-mode completion asks a [`Completer`] for the fragment to replace
//! and an ordered list of candidates. The editor inserts the first one and
//! cycles through the rest; providers never touch the buffer themselves.

use anyhow::Result;
use std::path::Path;

use crate::repl::text::is_blank;

/// What a provider sees when completion is triggered
#[derive(Debug, Clone, Copy)]
pub struct CompletionContext<'a> {
    pub line: &'a [char],
    /// Cursor as a character offset into `line`
    pub cursor: usize,
    /// Submitted shell lines, oldest first
    pub history: &'a [String],
}

/// Candidates replacing `[start, cursor)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub start: usize,
    pub candidates: Vec<String>,
}

/// Trait for completion providers
pub trait Completer {
    fn name(&self) -> &'static str;

    fn complete(&self, context: &CompletionContext<'_>) -> Result<Completion>;
}

/// Completes the blank-delimited word before the cursor as a file path
#[derive(Debug, Default)]
pub struct PathCompleter;

impl Completer for PathCompleter {
    fn name(&self) -> &'static str {
        "path"
    }

    fn complete(&self, context: &CompletionContext<'_>) -> Result<Completion> {
        let cursor = context.cursor.min(context.line.len());
        let start = context.line[..cursor]
            .iter()
            .rposition(|&ch| is_blank(ch))
            .map_or(0, |blank| blank + 1);
        let fragment: String = context.line[start..cursor].iter().collect();

        let (dir_part, prefix) = match fragment.rfind('/') {
            Some(slash) => fragment.split_at(slash + 1),
            None => ("", fragment.as_str()),
        };
        let dir = if dir_part.is_empty() {
            ".".to_string()
        } else {
            shellexpand::tilde(dir_part).into_owned()
        };

        let dir_path = Path::new(&dir);
        if !dir_path.is_dir() {
            tracing::debug!("no directory to complete in: {}", dir);
            return Ok(Completion {
                start,
                candidates: Vec::new(),
            });
        }

        let mut candidates = Vec::new();
        for entry in std::fs::read_dir(dir_path)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(prefix) || (name.starts_with('.') && !prefix.starts_with('.')) {
                continue;
            }
            let suffix = if entry.file_type()?.is_dir() { "/" } else { "" };
            candidates.push(format!("{dir_part}{name}{suffix}"));
        }
        candidates.sort();

        tracing::debug!("{} path candidates for {:?}", candidates.len(), fragment);
        Ok(Completion { start, candidates })
    }
}

/// Completes the whole line from shell history, most recent first
#[derive(Debug, Default)]
pub struct HistoryCompleter;

impl Completer for HistoryCompleter {
    fn name(&self) -> &'static str {
        "history"
    }

    fn complete(&self, context: &CompletionContext<'_>) -> Result<Completion> {
        let cursor = context.cursor.min(context.line.len());
        let prefix: String = context.line[..cursor].iter().collect();

        let mut candidates: Vec<String> = Vec::new();
        for entry in context.history.iter().rev() {
            if entry.starts_with(&prefix) && !candidates.contains(entry) {
                candidates.push(entry.clone());
            }
        }
        Ok(Completion {
            start: 0,
            candidates,
        })
    }
}

//! # Line History
//!
//! Ordered list of previously submitted lines with a browsing index. Moving
//! through the list writes the text being edited back into the slot being
//! left, so an in-progress line is never lost while browsing. The slot one
//! past the last entry holds the draft of the line not yet submitted.
//!
//! Shell-line history is persisted as JSON between sessions.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Browsable history of submitted lines
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    index: usize,
    draft: String,
}

/// On-disk layout of a history file
#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    version: u32,
    entries: Vec<String>,
}

impl HistoryFile {
    const CURRENT_VERSION: u32 = 1;
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<String>) -> Self {
        let index = entries.len();
        Self {
            entries,
            index,
            draft: String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Append a submitted line and reset browsing; blank lines are skipped
    pub fn push(&mut self, line: &str) {
        if !line.trim().is_empty() {
            self.entries.push(line.to_string());
        }
        self.reset_navigation();
    }

    /// Put the browsing index back on the draft slot and forget the draft
    pub fn reset_navigation(&mut self) {
        self.index = self.entries.len();
        self.draft.clear();
    }

    /// Step to the previous entry, storing `current` in the slot being left
    pub fn back(&mut self, current: &str) -> Option<String> {
        if self.index == 0 {
            return None;
        }
        self.write_back(current);
        self.index -= 1;
        Some(self.entries[self.index].clone())
    }

    /// Step to the next entry (or the draft), storing `current` first
    pub fn forward(&mut self, current: &str) -> Option<String> {
        if self.index >= self.entries.len() {
            return None;
        }
        self.write_back(current);
        self.index += 1;
        Some(self.slot().to_string())
    }

    fn slot(&self) -> &str {
        self.entries
            .get(self.index)
            .map(String::as_str)
            .unwrap_or(&self.draft)
    }

    fn write_back(&mut self, current: &str) {
        match self.entries.get_mut(self.index) {
            Some(entry) => *entry = current.to_string(),
            None => self.draft = current.to_string(),
        }
    }

    /// Keep only the `max` most recent entries
    pub fn truncate(&mut self, max: usize) {
        if self.entries.len() > max {
            let excess = self.entries.len() - max;
            self.entries.drain(..excess);
        }
        self.reset_navigation();
    }

    /// Load a JSON history file; a missing file yields an empty history
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read history file {}", path.display()))?;
        let file: HistoryFile = serde_json::from_str(&contents)
            .with_context(|| format!("malformed history file {}", path.display()))?;
        tracing::debug!("loaded {} history entries", file.entries.len());
        Ok(Self::from_entries(file.entries))
    }

    /// Write the `max` most recent entries to `path` as JSON
    pub fn save(&self, path: &Path, max: usize) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let skip = self.entries.len().saturating_sub(max);
        let file = HistoryFile {
            version: HistoryFile::CURRENT_VERSION,
            entries: self.entries[skip..].to_vec(),
        };
        let contents = serde_json::to_string_pretty(&file)?;
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write history file {}", path.display()))?;
        Ok(())
    }
}

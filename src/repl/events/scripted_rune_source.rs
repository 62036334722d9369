//! Scripted Rune Source
//!
//! Test implementation of [`RuneSource`] that replays a pre-programmed key
//! script, allowing deterministic runs of the editor without a terminal.

use super::rune_source::RuneSource;
use crate::repl::error::EditorError;
use anyhow::Result;
use std::collections::VecDeque;

/// Rune source that replays a fixed script
#[derive(Debug, Clone, Default)]
pub struct ScriptedRuneSource {
    runes: VecDeque<char>,
}

impl ScriptedRuneSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script from a string where control keys are written as their
    /// control characters (`"\x1b"` for Escape, `"\r"` for Enter)
    pub fn from_keys(keys: &str) -> Self {
        Self {
            runes: keys.chars().collect(),
        }
    }

    pub fn push_keys(&mut self, keys: &str) {
        self.runes.extend(keys.chars());
    }

    pub fn pending_count(&self) -> usize {
        self.runes.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.runes.is_empty()
    }
}

impl RuneSource for ScriptedRuneSource {
    fn read_rune(&mut self) -> Result<char> {
        self.runes
            .pop_front()
            .ok_or_else(|| EditorError::EndOfInput.into())
    }
}

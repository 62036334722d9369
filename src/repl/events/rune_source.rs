//! # Rune Source Abstraction
//!
//! The editor pulls one rune at a time from a [`RuneSource`]. Production
//! reads the terminal, tests read a pre-programmed script, and both sit
//! behind a [`RuneQueue`] which lets the editor push runes back in front of
//! the live stream:
//!
//! ```text
//! LineEditor ──▶ RuneQueue ──▶ pending (re-injected runes, read first)
//!                          └─▶ RuneSource (terminal or script)
//! ```
//!
//! Abbreviation expansion and completion cycling both re-inject runes. The
//! queue is a plain deque consumed on the same thread that fills it.

use anyhow::Result;
use std::collections::VecDeque;

/// Pull-based stream of input runes
pub trait RuneSource {
    /// Block until the next rune is available
    ///
    /// Returns `EditorError::EndOfInput` (wrapped) when the stream is
    /// exhausted; any other error is an I/O failure.
    fn read_rune(&mut self) -> Result<char>;
}

impl<S: RuneSource + ?Sized> RuneSource for Box<S> {
    fn read_rune(&mut self) -> Result<char> {
        (**self).read_rune()
    }
}

/// Rune source with support for synthetic re-injection
#[derive(Debug)]
pub struct RuneQueue<S: RuneSource> {
    source: S,
    pending: VecDeque<char>,
    last_synthetic: bool,
}

impl<S: RuneSource> RuneQueue<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pending: VecDeque::new(),
            last_synthetic: false,
        }
    }

    /// Push runes in front of everything else, keeping their order
    pub fn unread(&mut self, runes: &[char]) {
        for &rune in runes.iter().rev() {
            self.pending.push_front(rune);
        }
        tracing::trace!("re-injected {} runes", runes.len());
    }

    pub fn unread_str(&mut self, text: &str) {
        let runes: Vec<char> = text.chars().collect();
        self.unread(&runes);
    }

    /// Whether the most recently read rune came from re-injection
    pub fn last_was_synthetic(&self) -> bool {
        self.last_synthetic
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drop re-injected runes that were never consumed
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: RuneSource> RuneSource for RuneQueue<S> {
    fn read_rune(&mut self) -> Result<char> {
        if let Some(rune) = self.pending.pop_front() {
            self.last_synthetic = true;
            return Ok(rune);
        }
        let rune = self.source.read_rune()?;
        self.last_synthetic = false;
        Ok(rune)
    }
}

//! # Events Module
//!
//! Input plumbing for the line editor: key runes, the pull-based
//! [`RuneSource`] abstraction, the re-injection queue, and the terminal and
//! scripted sources.

pub mod keys;
pub mod rune_source;
pub mod scripted_rune_source;
pub mod terminal_rune_source;
pub mod types;

// Re-export all types for easy access
pub use rune_source::{RuneQueue, RuneSource};
pub use scripted_rune_source::ScriptedRuneSource;
pub use terminal_rune_source::{key_to_rune, TerminalRuneSource};
pub use types::{EditorMode, SearchDirection, Signal};

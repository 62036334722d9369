//! # Editor Errors
//!
//! Errors the editing engine needs to tell apart. They travel inside
//! `anyhow::Error` and are recovered with `downcast_ref` where the caller
//! has to decide between reporting and recovering.

use thiserror::Error;

/// Classified failures raised by the line editor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// The rune source has nothing more to give
    #[error("end of input")]
    EndOfInput,

    /// An Ex command name matched nothing in the command table
    #[error("E492: Not an editor command: {0}")]
    UnknownCommand(String),

    /// A literal search or substitution found no match
    #[error("E486: Pattern not found: {0}")]
    PatternNotFound(String),

    /// `f`/`F`/`t`/`T` found no occurrence of the target
    #[error("character not found: {0}")]
    CharNotFound(char),

    /// `n`/`N` or an empty search with nothing to repeat
    #[error("E35: No previous regular expression")]
    NoPreviousPattern,

    /// A substitution pattern that failed to compile
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// A completion provider returned nothing for the fragment
    #[error("no completion candidates")]
    NoCandidates,

    /// Undo or `g-` while already at the root snapshot
    #[error("Already at oldest change")]
    AlreadyAtOldest,

    /// Redo or `g+` with no later snapshot to move to
    #[error("Already at newest change")]
    AlreadyAtNewest,
}

impl EditorError {
    /// Check whether an `anyhow::Error` wraps end-of-input
    pub fn is_end_of_input(error: &anyhow::Error) -> bool {
        matches!(
            error.downcast_ref::<EditorError>(),
            Some(EditorError::EndOfInput)
        )
    }
}

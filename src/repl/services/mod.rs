//! # Services Layer
//!
//! Collaborators the editor talks to through narrow traits: completion
//! providers for Insert mode and the evaluator that runs finished lines.

pub mod completion;
pub mod evaluator;

pub use completion::{Completer, Completion, CompletionContext, HistoryCompleter, PathCompleter};
pub use evaluator::{CommandEvaluator, RecordingEvaluator, SystemShellEvaluator};

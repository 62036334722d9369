//! # Editor Module
//!
//! The modal line editor. [`LineEditor`] owns the buffer, registers, undo
//! tree and histories; each mode lives in its own file as a set of handler
//! methods on the editor:
//!
//! - `normal.rs` - counts, motions, single-key commands, put, undo, search
//! - `operator_pending.rs` - operator + motion/text object, doubling
//! - `visual.rs` - inclusive selections
//! - `insert.rs` - typing, abbreviations, completion
//! - `command_line.rs` - `:` and `/`/`?` prompts

mod command_line;
pub mod core;
mod insert;
mod normal;
mod operator_pending;
mod visual;

#[cfg(test)]
mod tests;

pub use self::core::{EditorOptions, LineEditor, LineOutcome, StartMode};

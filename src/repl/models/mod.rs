//! # Models Module
//!
//! State the editor mutates while reading a line: the rune buffer, the
//! register store, the undo tree, and line history.

pub mod buffer;
pub mod history;
pub mod registers;
pub mod undo_tree;

pub use buffer::{delimiter_pair, Buffer};
pub use history::History;
pub use registers::Registers;
pub use undo_tree::UndoTree;

//! # Text Module
//!
//! Pure computations over a buffer: character classes, cursor motions and
//! text objects. Nothing in here mutates the buffer.

pub mod char_class;
pub mod motions;
pub mod text_objects;

pub use char_class::{classify, is_blank, is_keyword, CharClass, WordKind};
pub use motions::{CharSearch, Motion, MotionType};
pub use text_objects::TextObject;

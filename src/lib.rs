//! # runeline - A Shell with a Modal Line Editor
//!
//! Each input line is edited in a small vim: Normal, Insert, Visual,
//! Operator-pending, Command-line and Search modes over a single-line
//! buffer, with registers, counts, text objects and an undo tree.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  runes   ┌──────────────┐  Frame   ┌──────────────┐
//! │  RuneSource  │─────────▶│  LineEditor  │─────────▶│  RenderSink  │
//! │ - terminal   │          │ - modes      │          │ - terminal   │
//! │ - script     │◀─unread──│ - registers  │          │ - recording  │
//! └──────────────┘          │ - undo tree  │          └──────────────┘
//!                           └──────┬───────┘
//!                                  │ line
//!                                  ▼
//!                           ┌──────────────┐          ┌──────────────────┐
//!                           │    Shell     │─────────▶│ CommandEvaluator │
//!                           └──────────────┘          └──────────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;

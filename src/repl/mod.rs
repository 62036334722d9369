//! # REPL
//!
//! The interactive shell and its modal line editor.
//!
//! ```text
//! RuneSource ──▶ LineEditor ──Frame──▶ RenderSink
//!                    │
//!                    └──line──▶ Shell ──▶ CommandEvaluator
//! ```

pub mod commands;
pub mod controllers;
pub mod editor;
pub mod error;
pub mod events;
pub mod models;
pub mod services;
pub mod text;
pub mod views;

pub use controllers::Shell;
pub use editor::{EditorOptions, LineEditor, LineOutcome, StartMode};
pub use error::EditorError;
pub use events::{EditorMode, RuneSource, ScriptedRuneSource, TerminalRuneSource};
pub use services::{CommandEvaluator, RecordingEvaluator, SystemShellEvaluator};
pub use views::{RecordingRenderSink, RenderSink, TerminalRenderer};

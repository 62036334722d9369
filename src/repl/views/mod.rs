//! # Views Module
//!
//! Rendering of the editor line: the [`RenderSink`] boundary, the crossterm
//! terminal renderer, and a recording sink for headless tests.

pub mod mock;
pub mod render;
pub mod terminal_renderer;

pub use mock::RecordingRenderSink;
pub use render::{Frame, RenderSink};
pub use terminal_renderer::TerminalRenderer;

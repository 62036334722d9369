//! # Render Sink
//!
//! The editor offers a [`Frame`] after every step and never reads anything
//! back. Cursor-column computation and screen drawing belong to the sink.

use anyhow::Result;

use crate::repl::events::EditorMode;

/// Everything needed to draw the prompt line and the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub prompt: String,
    pub content: String,
    /// Cursor as a character offset into `content`
    pub cursor: usize,
    /// Message for the status line, if any
    pub status: Option<String>,
    /// Character offset of the cursor inside `status` when the status line
    /// is being edited (command-line and search)
    pub status_cursor: Option<usize>,
    pub mode: EditorMode,
}

impl Frame {
    /// Status text to show: the message, or else the mode indicator
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_deref().or_else(|| self.mode.indicator())
    }
}

/// Trait for rendering the editor line
pub trait RenderSink {
    /// Draw the current frame
    fn render(&mut self, frame: &Frame) -> Result<()>;

    /// The line was submitted; leave the cursor where command output starts
    fn finish_line(&mut self, frame: &Frame) -> Result<()>;

    /// Hand the terminal to a child process
    fn suspend(&mut self) -> Result<()> {
        Ok(())
    }

    /// Take the terminal back after a child process ran
    fn resume(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<R: RenderSink + ?Sized> RenderSink for &mut R {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        (**self).render(frame)
    }

    fn finish_line(&mut self, frame: &Frame) -> Result<()> {
        (**self).finish_line(frame)
    }

    fn suspend(&mut self) -> Result<()> {
        (**self).suspend()
    }

    fn resume(&mut self) -> Result<()> {
        (**self).resume()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(status: Option<&str>, mode: EditorMode) -> Frame {
        Frame {
            prompt: "$ ".to_string(),
            content: String::new(),
            cursor: 0,
            status: status.map(str::to_string),
            status_cursor: None,
            mode,
        }
    }

    #[test]
    fn status_text_should_prefer_message_over_indicator() {
        assert_eq!(frame(Some("E35"), EditorMode::Insert).status_text(), Some("E35"));
        assert_eq!(frame(None, EditorMode::Insert).status_text(), Some("-- INSERT --"));
        assert_eq!(frame(None, EditorMode::Normal).status_text(), None);
    }
}

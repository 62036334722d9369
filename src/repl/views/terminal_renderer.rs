//! # Terminal Renderer
//!
//! Draws the prompt line and a status line below it with crossterm. The
//! terminal cursor is parked on the prompt line, or on the status line while
//! a command line or search pattern is being typed. Columns are measured in
//! display cells so wide characters keep the cursor aligned.

use anyhow::Result;
use crossterm::{
    cursor::{MoveToColumn, MoveUp},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

use super::render::{Frame, RenderSink};

/// Crossterm-backed render sink
pub struct TerminalRenderer<W: Write> {
    writer: W,
    /// Whether this renderer switched the terminal to raw mode
    owns_raw_mode: bool,
    /// The terminal cursor was left on the status line
    on_status_line: bool,
}

impl TerminalRenderer<io::Stdout> {
    /// Renderer on stdout, switching the terminal to raw mode
    pub fn stdout() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self {
            writer: io::stdout(),
            owns_raw_mode: true,
            on_status_line: false,
        })
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer on an arbitrary writer; raw mode is left alone
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            owns_raw_mode: false,
            on_status_line: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn return_to_prompt_line(&mut self) -> Result<()> {
        if self.on_status_line {
            queue!(self.writer, MoveUp(1))?;
            self.on_status_line = false;
        }
        Ok(())
    }
}

/// Display width of the first `chars` characters of `text`
fn prefix_width(text: &str, chars: usize) -> u16 {
    let end = text
        .char_indices()
        .nth(chars)
        .map_or(text.len(), |(offset, _)| offset);
    u16::try_from(text[..end].width()).unwrap_or(u16::MAX)
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        self.return_to_prompt_line()?;
        queue!(
            self.writer,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(&frame.prompt),
            Print(&frame.content),
            Print("\r\n"),
            Clear(ClearType::CurrentLine),
        )?;
        if let Some(status) = frame.status_text() {
            queue!(self.writer, Print(status))?;
        }

        let status_cursor = frame
            .status_cursor
            .filter(|_| frame.mode.edits_status_line());
        match (status_cursor, frame.status.as_deref()) {
            (Some(column), Some(status)) => {
                queue!(self.writer, MoveToColumn(prefix_width(status, column)))?;
                self.on_status_line = true;
            }
            _ => {
                let column = prefix_width(&frame.prompt, usize::MAX)
                    .saturating_add(prefix_width(&frame.content, frame.cursor));
                queue!(self.writer, MoveUp(1), MoveToColumn(column))?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }

    fn finish_line(&mut self, _frame: &Frame) -> Result<()> {
        if !self.on_status_line {
            queue!(self.writer, Print("\r\n"))?;
        }
        self.on_status_line = false;
        queue!(self.writer, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        self.writer.flush()?;
        Ok(())
    }

    fn suspend(&mut self) -> Result<()> {
        if self.owns_raw_mode {
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        if self.owns_raw_mode {
            terminal::enable_raw_mode()?;
        }
        Ok(())
    }
}

impl<W: Write> Drop for TerminalRenderer<W> {
    fn drop(&mut self) {
        if self.owns_raw_mode {
            if let Err(e) = terminal::disable_raw_mode() {
                tracing::error!("failed to restore terminal mode: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::events::EditorMode;

    fn frame(content: &str, cursor: usize, mode: EditorMode) -> Frame {
        Frame {
            prompt: "$ ".to_string(),
            content: content.to_string(),
            cursor,
            status: None,
            status_cursor: None,
            mode,
        }
    }

    fn output(renderer: &TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8_lossy(renderer.writer()).to_string()
    }

    #[test]
    fn prefix_width_should_count_display_cells() {
        assert_eq!(prefix_width("abc", 2), 2);
        assert_eq!(prefix_width("日本語", 2), 4);
        assert_eq!(prefix_width("ab", 10), 2);
    }

    #[test]
    fn render_should_draw_prompt_content_and_indicator() -> Result<()> {
        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        renderer.render(&frame("echo hi", 3, EditorMode::Insert))?;
        let out = output(&renderer);
        assert!(out.contains("$ echo hi"));
        assert!(out.contains("-- INSERT --"));
        assert!(!renderer.on_status_line);
        Ok(())
    }

    #[test]
    fn command_line_frames_should_park_cursor_on_status_line() -> Result<()> {
        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        let mut command = frame("echo", 4, EditorMode::CommandLine);
        command.status = Some(":quit".to_string());
        command.status_cursor = Some(5);
        renderer.render(&command)?;
        assert!(renderer.on_status_line);
        assert!(output(&renderer).contains(":quit"));

        renderer.finish_line(&command)?;
        assert!(!renderer.on_status_line);
        Ok(())
    }

    #[test]
    fn normal_frames_should_keep_cursor_on_prompt_line() -> Result<()> {
        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        let mut normal = frame("echo", 2, EditorMode::Normal);
        normal.status = Some("E486: Pattern not found: x".to_string());
        normal.status_cursor = Some(3);
        renderer.render(&normal)?;
        assert!(!renderer.on_status_line);
        assert!(output(&renderer).contains("E486"));
        Ok(())
    }
}

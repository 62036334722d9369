//! # Recording Render Sink
//!
//! Keeps every frame and every finished line in memory so tests can check
//! what the editor offered without a terminal.

use anyhow::Result;

use super::render::{Frame, RenderSink};

/// Render sink that records instead of drawing
#[derive(Debug, Default)]
pub struct RecordingRenderSink {
    frames: Vec<Frame>,
    finished: Vec<String>,
    suspensions: usize,
}

impl RecordingRenderSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Content of each line at the moment it was submitted
    pub fn finished_lines(&self) -> &[String] {
        &self.finished
    }

    /// Number of times the terminal was handed to a child process
    pub fn suspensions(&self) -> usize {
        self.suspensions
    }
}

impl RenderSink for RecordingRenderSink {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finish_line(&mut self, frame: &Frame) -> Result<()> {
        self.finished.push(frame.content.clone());
        Ok(())
    }

    fn suspend(&mut self) -> Result<()> {
        self.suspensions += 1;
        Ok(())
    }
}

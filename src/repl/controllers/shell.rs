//! # Shell Controller
//!
//! Ties the line editor to a renderer and an evaluator. The loop reads a
//! line, hands it to the evaluator with the terminal suspended, and repeats
//! until `:quit` or end of input.

use anyhow::Result;
use std::path::PathBuf;

use crate::repl::editor::{LineEditor, LineOutcome};
use crate::repl::error::EditorError;
use crate::repl::events::RuneSource;
use crate::repl::services::CommandEvaluator;
use crate::repl::views::RenderSink;

/// Read failures in a row before the loop gives up
const MAX_CONSECUTIVE_FAILURES: usize = 3;

/// The read-evaluate loop
pub struct Shell<S: RuneSource, R: RenderSink, E: CommandEvaluator> {
    editor: LineEditor<S>,
    renderer: R,
    evaluator: E,
    history_file: Option<PathBuf>,
    history_size: usize,
}

impl<S: RuneSource, R: RenderSink, E: CommandEvaluator> Shell<S, R, E> {
    pub fn new(editor: LineEditor<S>, renderer: R, evaluator: E) -> Self {
        Self {
            editor,
            renderer,
            evaluator,
            history_file: None,
            history_size: usize::MAX,
        }
    }

    /// Save shell history to `path` on exit, keeping `max` entries
    pub fn with_history_file(mut self, path: PathBuf, max: usize) -> Self {
        self.history_file = Some(path);
        self.history_size = max;
        self
    }

    pub fn editor(&self) -> &LineEditor<S> {
        &self.editor
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Run until `:quit` or end of input, then persist history
    pub fn run(&mut self) -> Result<()> {
        tracing::info!("shell started");
        let result = self.read_eval_loop();
        self.save_history();
        tracing::info!("shell stopped");
        result
    }

    fn read_eval_loop(&mut self) -> Result<()> {
        let mut failures = 0;
        loop {
            match self.editor.read_line(&mut self.renderer) {
                Ok(LineOutcome::Complete(line)) => {
                    failures = 0;
                    if !line.trim().is_empty() {
                        self.evaluate(&line)?;
                    }
                }
                Ok(LineOutcome::Abort) => return Ok(()),
                Err(err) if EditorError::is_end_of_input(&err) => {
                    tracing::info!("end of input");
                    return Ok(());
                }
                Err(err) => {
                    failures += 1;
                    tracing::error!("reading line failed ({}): {:#}", failures, err);
                    if failures >= MAX_CONSECUTIVE_FAILURES {
                        return Err(err.context("giving up after repeated input failures"));
                    }
                }
            }
        }
    }

    fn evaluate(&mut self, line: &str) -> Result<()> {
        self.renderer.suspend()?;
        if let Err(err) = self.evaluator.evaluate(line) {
            tracing::error!("evaluating {:?} failed: {:#}", line, err);
            eprintln!("runeline: {err:#}");
        }
        self.renderer.resume()
    }

    fn save_history(&self) {
        let Some(path) = &self.history_file else {
            return;
        };
        match self.editor.history().save(path, self.history_size) {
            Ok(()) => tracing::debug!("history saved to {}", path.display()),
            Err(err) => tracing::warn!("could not save history to {}: {:#}", path.display(), err),
        }
    }
}

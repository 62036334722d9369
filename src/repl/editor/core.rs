//! # Line Editor Core
//!
//! The mode state machine that turns runes into one finished line. Each
//! [`LineEditor::step`] reads exactly one rune (plus a small bounded number
//! of follow-up runes for multi-key commands such as `"a`, `f{char}` or
//! `gu`), lets the active mode handle it, and returns a [`Signal`].
//!
//! The active mode is moved out of the editor for the duration of a step
//! and replaced by whatever the handler returns. A handler that fails leaves
//! the editor in Normal mode, which clears any pending operator, count or
//! register. Recoverable failures (misses, unknown commands) become the
//! status message; end of input and I/O errors propagate to the caller.

use anyhow::Result;
use std::collections::HashMap;

use crate::repl::commands::{lookup, Action, Binding, EditAction, ExCommandRegistry, Lookup};
use crate::repl::error::EditorError;
use crate::repl::events::keys::describe;
use crate::repl::events::{EditorMode, RuneQueue, RuneSource, SearchDirection, Signal};
use crate::repl::models::{Buffer, History, Registers, UndoTree};
use crate::repl::services::{Completer, HistoryCompleter, PathCompleter};
use crate::repl::text::motions::word_backward;
use crate::repl::text::{CharSearch, WordKind};
use crate::repl::views::{Frame, RenderSink};

use super::insert::InsertState;

/// Mode each new line starts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartMode {
    #[default]
    Insert,
    Normal,
}

/// Editor behavior fixed at construction
#[derive(Debug, Clone)]
pub struct EditorOptions {
    pub prompt: String,
    pub start_mode: StartMode,
    /// Insert-mode abbreviations, keyword to expansion
    pub abbreviations: HashMap<String, String>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            prompt: "$ ".to_string(),
            start_mode: StartMode::Insert,
            abbreviations: HashMap::new(),
        }
    }
}

/// How reading a line ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Complete(String),
    /// `:quit`
    Abort,
}

/// Active mode with its transient state
#[derive(Debug)]
pub(super) enum ModeState {
    Normal {
        count: Option<usize>,
    },
    Insert(InsertState),
    Visual {
        anchor: usize,
        count: Option<usize>,
    },
    OperatorPending(crate::repl::commands::OperatorContext),
    /// `:` with its own sub-buffer
    CommandLine(Buffer),
    /// `/` or `?` with its own sub-buffer
    Search(Buffer, SearchDirection),
}

impl Default for ModeState {
    fn default() -> Self {
        ModeState::Normal { count: None }
    }
}

impl ModeState {
    pub(super) fn mode(&self) -> EditorMode {
        match self {
            ModeState::Normal { .. } => EditorMode::Normal,
            ModeState::Insert(_) => EditorMode::Insert,
            ModeState::Visual { .. } => EditorMode::Visual,
            ModeState::OperatorPending(_) => EditorMode::OperatorPending,
            ModeState::CommandLine(_) => EditorMode::CommandLine,
            ModeState::Search(..) => EditorMode::Search,
        }
    }
}

/// Result of handling one key
#[derive(Debug)]
pub(super) struct Transition {
    pub(super) next: ModeState,
    pub(super) signal: Signal,
}

impl Transition {
    pub(super) fn to(next: ModeState) -> Self {
        Self {
            next,
            signal: Signal::Continue,
        }
    }

    pub(super) fn normal() -> Self {
        Self::to(ModeState::default())
    }

    pub(super) fn with_signal(next: ModeState, signal: Signal) -> Self {
        Self { next, signal }
    }
}

/// Modal single-line editor
pub struct LineEditor<S: RuneSource> {
    pub(super) input: RuneQueue<S>,
    pub(super) buffer: Buffer,
    pub(super) registers: Registers,
    pub(super) undo: UndoTree,
    /// Submitted shell lines
    pub(super) history: History,
    pub(super) command_history: History,
    pub(super) search_history: History,
    pub(super) ex_commands: ExCommandRegistry,
    pub(super) path_completer: Box<dyn Completer>,
    pub(super) history_completer: Box<dyn Completer>,
    pub(super) options: EditorOptions,
    pub(super) mode: ModeState,
    /// Register chosen with `"` for the next command
    pub(super) pending_register: Option<char>,
    pub(super) last_find: Option<CharSearch>,
    pub(super) last_search_direction: SearchDirection,
    pub(super) status: Option<String>,
}

impl<S: RuneSource> LineEditor<S> {
    pub fn new(source: S, options: EditorOptions) -> Self {
        Self {
            input: RuneQueue::new(source),
            buffer: Buffer::new(),
            registers: Registers::new(),
            undo: UndoTree::new(),
            history: History::new(),
            command_history: History::new(),
            search_history: History::new(),
            ex_commands: ExCommandRegistry::new(),
            path_completer: Box::new(PathCompleter),
            history_completer: Box::new(HistoryCompleter),
            options,
            mode: ModeState::default(),
            pending_register: None,
            last_find: None,
            last_search_direction: SearchDirection::Forward,
            status: None,
        }
    }

    /// Seed shell-line history, e.g. from the history file
    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    /// Replace the provider used by Tab and Ctrl-X Ctrl-F
    pub fn with_path_completer(mut self, completer: Box<dyn Completer>) -> Self {
        self.path_completer = completer;
        self
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn mode(&self) -> EditorMode {
        self.mode.mode()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn source(&self) -> &S {
        self.input.source()
    }

    pub fn source_mut(&mut self) -> &mut S {
        self.input.source_mut()
    }

    /// Read one line, rendering after every step
    pub fn read_line<R: RenderSink + ?Sized>(&mut self, sink: &mut R) -> Result<LineOutcome> {
        self.begin_line();
        sink.render(&self.frame())?;

        loop {
            match self.step()? {
                Signal::Continue => sink.render(&self.frame())?,
                Signal::LineComplete => {
                    let line = self.buffer.text();
                    tracing::info!("line complete: {:?}", line);
                    sink.finish_line(&self.frame())?;
                    self.history.push(&line);
                    return Ok(LineOutcome::Complete(line));
                }
                Signal::Abort => {
                    tracing::info!("line aborted");
                    sink.finish_line(&self.frame())?;
                    return Ok(LineOutcome::Abort);
                }
            }
        }
    }

    /// Fresh buffer, undo tree and mode for the next line
    ///
    /// Registers and histories carry over from line to line. Re-injected
    /// runes left over from an interrupted line are dropped.
    pub(crate) fn begin_line(&mut self) {
        self.input.clear_pending();
        self.buffer.clear();
        self.undo.reset();
        self.history.reset_navigation();
        self.pending_register = None;
        self.status = None;
        self.mode = match self.options.start_mode {
            StartMode::Insert => self.enter_insert(),
            StartMode::Normal => ModeState::default(),
        };
    }

    /// Read one key and run it through the active mode
    pub fn step(&mut self) -> Result<Signal> {
        let key = self.input.read_rune()?;
        self.status = None;

        let mode = std::mem::take(&mut self.mode);
        let before = mode.mode();
        tracing::debug!("{:?} key {}", before, describe(key));

        let outcome = match mode {
            ModeState::Normal { count } => self.normal_key(key, count),
            ModeState::Insert(state) => self.insert_key(key, state),
            ModeState::Visual { anchor, count } => self.visual_key(key, anchor, count),
            ModeState::OperatorPending(context) => self.pending_key(key, context),
            ModeState::CommandLine(prompt) => self.command_line_key(key, prompt),
            ModeState::Search(prompt, direction) => self.search_key(key, prompt, direction),
        };

        let transition = match outcome {
            Ok(transition) => transition,
            Err(err) => match err.downcast::<EditorError>() {
                Ok(EditorError::EndOfInput) => return Err(EditorError::EndOfInput.into()),
                Ok(recoverable) => {
                    self.report(recoverable);
                    Transition::normal()
                }
                Err(other) => return Err(other),
            },
        };

        let after = transition.next.mode();
        if after != before {
            tracing::debug!("mode {:?} -> {:?}", before, after);
        }
        self.mode = transition.next;
        self.settle_cursor();
        Ok(transition.signal)
    }

    /// Normal and Visual mode never rest one past the last character
    fn settle_cursor(&mut self) {
        let len = self.buffer.len();
        if matches!(self.mode, ModeState::Normal { .. } | ModeState::Visual { .. })
            && len > 0
            && self.buffer.cursor() >= len
        {
            self.buffer.move_to(len - 1);
        }
    }

    /// Snapshot of what the renderer should show
    pub fn frame(&self) -> Frame {
        let (status, status_cursor) = match &self.mode {
            ModeState::CommandLine(prompt) => (
                Some(format!(":{}", prompt.text())),
                Some(prompt.cursor() + 1),
            ),
            ModeState::Search(prompt, direction) => (
                Some(format!("{}{}", direction.prompt_char(), prompt.text())),
                Some(prompt.cursor() + 1),
            ),
            _ => (self.status.clone(), None),
        };
        Frame {
            prompt: self.options.prompt.clone(),
            content: self.buffer.text(),
            cursor: self.buffer.cursor(),
            status,
            status_cursor,
            mode: self.mode.mode(),
        }
    }

    pub(super) fn report(&mut self, error: EditorError) {
        tracing::debug!("reported: {}", error);
        self.status = Some(error.to_string());
    }

    /// Turn a recoverable editor error into a status message
    pub(super) fn recover<T>(&mut self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) => match err.downcast::<EditorError>() {
                Ok(EditorError::EndOfInput) => Err(EditorError::EndOfInput.into()),
                Ok(recoverable) => {
                    self.report(recoverable);
                    Ok(None)
                }
                Err(other) => Err(other),
            },
        }
    }

    /// Read keys until they name a binding in `tables`
    ///
    /// Returns `None` for an unbound sequence.
    pub(super) fn read_action(
        &mut self,
        first: char,
        tables: &[&[Binding<Action>]],
    ) -> Result<Option<Action>> {
        let mut keys = first.to_string();
        loop {
            match lookup(tables, &keys) {
                Lookup::Found(action) => return Ok(Some(action)),
                Lookup::Prefix => keys.push(self.input.read_rune()?),
                Lookup::Missing => {
                    tracing::debug!("unbound keys {:?}", keys);
                    return Ok(None);
                }
            }
        }
    }

    /// Push a snapshot of the buffer unless it matches the current one
    pub(super) fn snapshot(&mut self) {
        let text = self.buffer.text();
        self.undo.add_if_changed(&text);
    }

    /// Load a recalled line with the cursor at its end
    pub(super) fn load_line(&mut self, line: &str) {
        self.buffer.set_text(line);
        self.buffer.move_to(self.buffer.len());
    }

    /// Step through shell history, `count` entries at a time
    pub(super) fn recall_history(&mut self, back: bool, count: usize) -> bool {
        let mut recalled = None;
        for _ in 0..count {
            let current = self.buffer.text();
            let next = if back {
                self.history.back(&current)
            } else {
                self.history.forward(&current)
            };
            match next {
                Some(line) => {
                    self.load_line(&line);
                    recalled = Some(line);
                }
                None => break,
            }
        }
        recalled.is_some()
    }
}

/// Editing keys shared by Insert mode and the prompt sub-buffers
///
/// Returns false for actions that are not plain buffer edits.
pub(super) fn edit_in_place(buffer: &mut Buffer, action: EditAction) -> bool {
    let cursor = buffer.cursor();
    match action {
        EditAction::Backspace => {
            if cursor > 0 {
                buffer.delete(cursor - 1, cursor);
            }
        }
        EditAction::DeleteWord => {
            let start = word_backward(buffer, cursor, WordKind::Word);
            buffer.delete(start, cursor);
        }
        EditAction::DeleteToStart => {
            buffer.delete(0, cursor);
        }
        EditAction::Left => buffer.move_by(-1),
        EditAction::Right => buffer.move_by(1),
        EditAction::LineStart => buffer.move_to(0),
        EditAction::LineEnd => buffer.move_to(buffer.len()),
        _ => return false,
    }
    true
}

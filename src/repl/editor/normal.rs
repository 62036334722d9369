//! Normal mode: counts, motions, operators and the single-key commands.

use anyhow::Result;

use crate::repl::commands::registry::{MOTIONS, NORMAL_COMMANDS};
use crate::repl::commands::{push_digit, Action, InsertAt, OperatorContext, OperatorType};
use crate::repl::error::EditorError;
use crate::repl::events::keys::{is_cancel, is_printable};
use crate::repl::events::{RuneSource, SearchDirection, Signal};
use crate::repl::models::registers::UNNAMED;
use crate::repl::models::Registers;
use crate::repl::text::motions::first_non_blank;
use crate::repl::text::{CharSearch, Motion};

use super::core::{LineEditor, ModeState, Transition};

/// Upper bound on runes a single `p`/`P` inserts
pub(super) const MAX_PUT_RUNES: usize = 100_000;

impl<S: RuneSource> LineEditor<S> {
    pub(super) fn normal_key(&mut self, key: char, count: Option<usize>) -> Result<Transition> {
        if let Some(digit) = key.to_digit(10) {
            // a leading 0 is the line-start motion, not a count
            if digit != 0 || count.is_some() {
                let count = push_digit(count, digit);
                return Ok(Transition::to(ModeState::Normal { count }));
            }
        }

        match self.read_action(key, &[NORMAL_COMMANDS, MOTIONS])? {
            Some(action) => self.normal_action(action, count),
            None => {
                self.pending_register = None;
                Ok(Transition::normal())
            }
        }
    }

    fn normal_action(&mut self, action: Action, count: Option<usize>) -> Result<Transition> {
        let register = self.pending_register.take();
        let n = count.unwrap_or(1);
        let cursor = self.buffer.cursor();

        match action {
            Action::Motion(motion) => {
                let target = motion.resolve(&self.buffer, cursor, n)?;
                self.buffer.move_to(target);
            }
            Action::FindChar { forward, till } => {
                let target = self.input.read_rune()?;
                if is_cancel(target) {
                    return Ok(Transition::normal());
                }
                let search = CharSearch::new(target, forward, till);
                self.last_find = Some(search);
                let target = Motion::FindChar(search).resolve(&self.buffer, cursor, n)?;
                self.buffer.move_to(target);
            }
            Action::RepeatFind { reverse } => {
                if let Some(search) = self.last_find {
                    let search = if reverse { search.reversed() } else { search };
                    let target = Motion::RepeatFind(search).resolve(&self.buffer, cursor, n)?;
                    self.buffer.move_to(target);
                }
            }
            Action::Operator(op) => {
                let context = OperatorContext::new(op, cursor, count, register);
                return Ok(Transition::to(ModeState::OperatorPending(context)));
            }
            Action::Alias(keys) => {
                // the count and register carry over to the expanded keys
                self.input.unread_str(keys);
                self.pending_register = register;
                return Ok(Transition::to(ModeState::Normal { count }));
            }
            Action::Insert(at) => {
                let target = match at {
                    InsertAt::Cursor => cursor,
                    InsertAt::AfterCursor => cursor + 1,
                    InsertAt::FirstNonBlank => first_non_blank(&self.buffer),
                    InsertAt::LineEnd => self.buffer.len(),
                };
                self.buffer.move_to(target);
                return Ok(Transition::to(self.enter_insert()));
            }
            Action::ReplaceChar => self.replace_chars(n)?,
            Action::SwitchCaseChar => {
                let end = cursor.saturating_add(n).min(self.buffer.len());
                let text = self.buffer.slice(cursor, end);
                if let Some(switched) = OperatorType::SwitchCase.transform(&text) {
                    self.buffer.replace(&switched, cursor as isize);
                    self.snapshot();
                }
                self.buffer.move_to(end);
            }
            Action::Put { before } => self.put(register, n, before),
            Action::Undo => self.walk_undo(n, UndoWalk::Undo),
            Action::Redo => self.walk_undo(n, UndoWalk::Redo),
            Action::Earlier => self.walk_undo(n, UndoWalk::Earlier),
            Action::Later => self.walk_undo(n, UndoWalk::Later),
            Action::SelectRegister => {
                let name = self.input.read_rune()?;
                if Registers::is_valid_name(name) {
                    self.pending_register = Some(name);
                } else {
                    tracing::debug!("ignoring invalid register name {:?}", name);
                }
                return Ok(Transition::to(ModeState::Normal { count }));
            }
            Action::VisualMode => {
                return Ok(Transition::to(ModeState::Visual {
                    anchor: cursor,
                    count: None,
                }));
            }
            Action::CommandLine => {
                self.command_history.reset_navigation();
                return Ok(Transition::to(ModeState::CommandLine(Default::default())));
            }
            Action::Search(direction) => {
                self.search_history.reset_navigation();
                return Ok(Transition::to(ModeState::Search(
                    Default::default(),
                    direction,
                )));
            }
            Action::SearchNext { reverse } => {
                let direction = if reverse {
                    self.last_search_direction.reverse()
                } else {
                    self.last_search_direction
                };
                self.search(None, direction, n)?;
            }
            Action::HistoryBack | Action::HistoryForward => {
                if self.recall_history(action == Action::HistoryBack, n) {
                    self.snapshot();
                }
            }
            Action::Submit => {
                return Ok(Transition::with_signal(
                    ModeState::default(),
                    Signal::LineComplete,
                ));
            }
            Action::Cancel
            | Action::TextObject { .. }
            | Action::SwapAnchor
            | Action::VisualOperator(_) => {}
        }
        Ok(Transition::normal())
    }

    /// `r{char}`: overwrite `count` characters starting at the cursor
    fn replace_chars(&mut self, count: usize) -> Result<()> {
        let replacement = self.input.read_rune()?;
        if is_cancel(replacement) || !is_printable(replacement) {
            return Ok(());
        }
        let cursor = self.buffer.cursor();
        if cursor.saturating_add(count) > self.buffer.len() {
            return Ok(());
        }
        let text: String = std::iter::repeat(replacement).take(count).collect();
        self.buffer.replace(&text, cursor as isize);
        self.buffer.move_to(cursor + count - 1);
        self.snapshot();
        Ok(())
    }

    /// `p`/`P`: insert a register `count` times, cursor on the last put char
    ///
    /// Copies are capped at [`MAX_PUT_RUNES`] runes; one copy always goes in.
    pub(super) fn put(&mut self, register: Option<char>, count: usize, before: bool) {
        let name = register.unwrap_or(UNNAMED);
        let text = match self.registers.get(name) {
            Some(text) if !text.is_empty() => {
                let copies = count.min(MAX_PUT_RUNES / text.chars().count()).max(1);
                text.repeat(copies)
            }
            _ => {
                tracing::debug!("nothing to put from register {:?}", name);
                return;
            }
        };

        let cursor = self.buffer.cursor();
        let at = if before || self.buffer.is_empty() {
            cursor
        } else {
            (cursor + 1).min(self.buffer.len())
        };
        self.buffer.insert(&text, at);
        self.buffer.move_to(at + text.chars().count() - 1);
        self.snapshot();
    }

    fn walk_undo(&mut self, count: usize, walk: UndoWalk) {
        let mut moved = false;
        for _ in 0..count {
            let state = match walk {
                UndoWalk::Undo => self.undo.undo(),
                UndoWalk::Redo => self.undo.redo(),
                UndoWalk::Earlier => self.undo.earlier(),
                UndoWalk::Later => self.undo.later(),
            };
            match state {
                Some(text) => {
                    self.buffer.set_text(&text);
                    moved = true;
                }
                None => break,
            }
        }

        if !moved {
            self.report(match walk {
                UndoWalk::Undo | UndoWalk::Earlier => EditorError::AlreadyAtOldest,
                UndoWalk::Redo | UndoWalk::Later => EditorError::AlreadyAtNewest,
            });
            return;
        }
        self.status = Some(format!(
            "change #{}; {} seconds ago",
            self.undo.current_seq(),
            self.undo.current_age().as_secs()
        ));
    }

    /// Find the `count`th match of a literal pattern without wrapping
    ///
    /// `None` (or an empty pattern) reuses the last search.
    pub(super) fn search(
        &mut self,
        pattern: Option<String>,
        direction: SearchDirection,
        count: usize,
    ) -> Result<()> {
        let pattern = match pattern.filter(|p| !p.is_empty()) {
            Some(pattern) => pattern,
            None => self
                .registers
                .get(crate::repl::models::registers::LAST_SEARCH)
                .map(str::to_string)
                .ok_or(EditorError::NoPreviousPattern)?,
        };

        let runes: Vec<char> = pattern.chars().collect();
        let mut pos = self.buffer.cursor();
        for _ in 0..count.max(1) {
            let found = match direction {
                SearchDirection::Forward => self.buffer.find(&runes, pos + 1),
                SearchDirection::Backward => self.buffer.rfind(&runes, pos),
            };
            pos = found.ok_or_else(|| EditorError::PatternNotFound(pattern.clone()))?;
        }
        tracing::debug!("search {:?} {:?} found at {}", direction, pattern, pos);
        self.buffer.move_to(pos);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum UndoWalk {
    Undo,
    Redo,
    Earlier,
    Later,
}

//! Insert mode: typing, in-line editing keys, abbreviations and completion.

use anyhow::Result;

use crate::repl::commands::{edit_action, EditAction};
use crate::repl::error::EditorError;
use crate::repl::events::keys::{is_enter, is_printable, CTRL_F, CTRL_L, CTRL_N, CTRL_P, CTRL_X, ESC, TAB};
use crate::repl::events::{RuneSource, Signal};
use crate::repl::services::CompletionContext;
use crate::repl::text::is_keyword;

use super::core::{edit_in_place, LineEditor, ModeState, Transition};

/// State of one insert session
#[derive(Debug, Clone, Default)]
pub(crate) struct InsertState {
    /// Buffer text when the session started
    before: String,
    /// Runes typed during the session, for the `.` register
    typed: String,
    completion: Option<CompletionCycle>,
}

/// Candidates being cycled through after a completion trigger
#[derive(Debug, Clone)]
struct CompletionCycle {
    trigger: char,
    start: usize,
    candidates: Vec<String>,
    index: usize,
}

#[derive(Debug, Clone, Copy)]
enum Provider {
    Path,
    History,
}

impl<S: RuneSource> LineEditor<S> {
    pub(super) fn enter_insert(&self) -> ModeState {
        ModeState::Insert(InsertState {
            before: self.buffer.text(),
            ..InsertState::default()
        })
    }

    pub(super) fn insert_key(&mut self, key: char, mut state: InsertState) -> Result<Transition> {
        if let Some(cycle) = state.completion.take() {
            return self.continue_completion(key, state, cycle);
        }

        if !self.input.last_was_synthetic() && self.expand_abbreviation(key) {
            return Ok(Transition::to(ModeState::Insert(state)));
        }

        match edit_action(key) {
            Some(EditAction::Submit) => {
                return Ok(Transition::with_signal(
                    ModeState::Insert(state),
                    Signal::LineComplete,
                ));
            }
            Some(EditAction::Leave) => return Ok(Transition::to(self.leave_insert(state))),
            Some(EditAction::CompletePath) => {
                return self.start_completion(state, Provider::Path, TAB);
            }
            Some(EditAction::Expand) => {
                let selector = self.input.read_rune()?;
                return match selector {
                    CTRL_F => self.start_completion(state, Provider::Path, CTRL_F),
                    CTRL_L => self.start_completion(state, Provider::History, CTRL_L),
                    _ => Ok(Transition::to(ModeState::Insert(state))),
                };
            }
            Some(EditAction::HistoryBack) => {
                self.recall_history(true, 1);
            }
            Some(EditAction::HistoryForward) => {
                self.recall_history(false, 1);
            }
            Some(EditAction::Backspace) => {
                edit_in_place(&mut self.buffer, EditAction::Backspace);
                state.typed.pop();
            }
            Some(edit) => {
                edit_in_place(&mut self.buffer, edit);
            }
            None if is_printable(key) => {
                let cursor = self.buffer.cursor();
                self.buffer.insert_runes(&[key], cursor);
                state.typed.push(key);
            }
            None => tracing::debug!("ignoring control key {:?} in insert mode", key),
        }
        Ok(Transition::to(ModeState::Insert(state)))
    }

    /// Back to Normal, recording the session for undo and `.`
    fn leave_insert(&mut self, state: InsertState) -> ModeState {
        if self.buffer.text() != state.before {
            self.snapshot();
        }
        self.registers.set_last_inserted(&state.typed);
        self.buffer.move_by(-1);
        ModeState::default()
    }

    /// Replace an abbreviation before the cursor, re-injecting `key`
    fn expand_abbreviation(&mut self, key: char) -> bool {
        if self.options.abbreviations.is_empty() {
            return false;
        }
        let terminates = is_enter(key) || key == ESC || (is_printable(key) && !is_keyword(key));
        if !terminates {
            return false;
        }

        let cursor = self.buffer.cursor();
        let start = self
            .buffer
            .last_index_func(is_keyword, cursor, false)
            .map_or(0, |boundary| boundary + 1);
        if start >= cursor {
            return false;
        }
        let word = self.buffer.slice(start, cursor);
        let Some(expansion) = self.options.abbreviations.get(&word) else {
            return false;
        };

        tracing::debug!("abbreviation {:?} -> {:?}", word, expansion);
        let mut runes: Vec<char> = expansion.chars().collect();
        runes.push(key);
        self.buffer.delete(start, cursor);
        self.input.unread(&runes);
        true
    }

    fn start_completion(
        &mut self,
        mut state: InsertState,
        provider: Provider,
        trigger: char,
    ) -> Result<Transition> {
        let cursor = self.buffer.cursor();
        let completer = match provider {
            Provider::Path => &self.path_completer,
            Provider::History => &self.history_completer,
        };
        let context = CompletionContext {
            line: self.buffer.content(),
            cursor,
            history: self.history.entries(),
        };
        let completion = match completer.complete(&context) {
            Ok(completion) => completion,
            Err(err) => {
                tracing::warn!("{} completion failed: {:#}", completer.name(), err);
                self.status = Some(err.to_string());
                return Ok(Transition::to(ModeState::Insert(state)));
            }
        };

        let Some(first) = completion.candidates.first() else {
            self.report(EditorError::NoCandidates);
            return Ok(Transition::to(ModeState::Insert(state)));
        };
        let start = completion.start.min(cursor);
        self.buffer.delete(start, cursor);
        self.buffer.insert(first, start);

        state.completion = Some(CompletionCycle {
            trigger,
            start,
            candidates: completion.candidates,
            index: 0,
        });
        Ok(Transition::to(ModeState::Insert(state)))
    }

    fn continue_completion(
        &mut self,
        key: char,
        mut state: InsertState,
        mut cycle: CompletionCycle,
    ) -> Result<Transition> {
        let mut forward = key == cycle.trigger || key == CTRL_N;
        if key == CTRL_X && cycle.trigger != TAB {
            let selector = self.input.read_rune()?;
            if selector == cycle.trigger {
                forward = true;
            } else {
                self.input.unread(&[key, selector]);
                return Ok(Transition::to(ModeState::Insert(state)));
            }
        }

        if !forward && key != CTRL_P {
            // any other key ends the cycle and is handled as ordinary input
            let live = !self.input.last_was_synthetic();
            if !(live && self.expand_abbreviation(key)) {
                self.input.unread(&[key]);
            }
            return Ok(Transition::to(ModeState::Insert(state)));
        }

        let total = cycle.candidates.len();
        let next = if forward {
            (cycle.index + 1) % total
        } else {
            (cycle.index + total - 1) % total
        };
        let shown = cycle.candidates[cycle.index].chars().count();
        self.buffer.delete(cycle.start, cycle.start + shown);
        self.buffer.insert(&cycle.candidates[next], cycle.start);

        cycle.index = next;
        state.completion = Some(cycle);
        Ok(Transition::to(ModeState::Insert(state)))
    }
}

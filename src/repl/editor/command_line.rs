//! Command-line (`:`) and search (`/`, `?`) prompts.
//!
//! Both edit their own sub-buffer shown in the status line. Enter submits,
//! Escape or Backspace on an empty prompt cancels back to Normal.

use anyhow::Result;

use crate::repl::commands::{edit_action, Continuity, EditAction, ExTarget};
use crate::repl::events::keys::is_printable;
use crate::repl::events::{RuneSource, SearchDirection, Signal};
use crate::repl::models::{Buffer, History};

use super::core::{edit_in_place, LineEditor, ModeState, Transition};

/// What a key did to a prompt
enum PromptEvent {
    Editing,
    Cancel,
    Submit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    Command,
    Search,
}

impl<S: RuneSource> LineEditor<S> {
    pub(super) fn command_line_key(&mut self, key: char, mut prompt: Buffer) -> Result<Transition> {
        match self.edit_prompt(key, &mut prompt, PromptKind::Command) {
            PromptEvent::Editing => Ok(Transition::to(ModeState::CommandLine(prompt))),
            PromptEvent::Cancel => Ok(Transition::normal()),
            PromptEvent::Submit(line) => self.run_command_line(&line),
        }
    }

    pub(super) fn search_key(
        &mut self,
        key: char,
        mut prompt: Buffer,
        direction: SearchDirection,
    ) -> Result<Transition> {
        match self.edit_prompt(key, &mut prompt, PromptKind::Search) {
            PromptEvent::Editing => Ok(Transition::to(ModeState::Search(prompt, direction))),
            PromptEvent::Cancel => Ok(Transition::normal()),
            PromptEvent::Submit(pattern) => {
                if !pattern.is_empty() {
                    self.registers.set_last_search(&pattern);
                    self.search_history.push(&pattern);
                }
                self.last_search_direction = direction;
                self.search(Some(pattern), direction, 1)?;
                Ok(Transition::normal())
            }
        }
    }

    fn prompt_history(&mut self, kind: PromptKind) -> &mut History {
        match kind {
            PromptKind::Command => &mut self.command_history,
            PromptKind::Search => &mut self.search_history,
        }
    }

    fn edit_prompt(&mut self, key: char, prompt: &mut Buffer, kind: PromptKind) -> PromptEvent {
        match edit_action(key) {
            Some(EditAction::Submit) => return PromptEvent::Submit(prompt.text()),
            Some(EditAction::Leave) => return PromptEvent::Cancel,
            Some(EditAction::Backspace) if prompt.is_empty() => return PromptEvent::Cancel,
            Some(action @ (EditAction::HistoryBack | EditAction::HistoryForward)) => {
                let back = action == EditAction::HistoryBack;
                let current = prompt.text();
                let history = self.prompt_history(kind);
                let recalled = if back {
                    history.back(&current)
                } else {
                    history.forward(&current)
                };
                if let Some(line) = recalled {
                    prompt.set_text(&line);
                    prompt.move_to(prompt.len());
                }
            }
            Some(EditAction::Expand) | Some(EditAction::CompletePath) => {}
            Some(edit) => {
                edit_in_place(prompt, edit);
            }
            None if is_printable(key) => {
                let cursor = prompt.cursor();
                prompt.insert_runes(&[key], cursor);
            }
            None => {}
        }
        PromptEvent::Editing
    }

    fn run_command_line(&mut self, line: &str) -> Result<Transition> {
        tracing::debug!("command line {:?}", line);
        self.registers.set_last_command(line);
        self.command_history.push(line);

        let mut target = ExTarget {
            buffer: &mut self.buffer,
            registers: &mut self.registers,
            undo: &mut self.undo,
            status: &mut self.status,
        };
        match self.ex_commands.execute_line(line, &mut target)? {
            Continuity::Continue => Ok(Transition::normal()),
            Continuity::Quit => Ok(Transition::with_signal(
                ModeState::default(),
                Signal::Abort,
            )),
        }
    }
}

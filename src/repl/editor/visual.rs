//! Visual mode: a selection from an anchor to the cursor, both inclusive.

use anyhow::Result;

use crate::repl::commands::registry::{MOTIONS, VISUAL_COMMANDS};
use crate::repl::commands::{push_digit, Action, OperatorContext};
use crate::repl::events::keys::is_cancel;
use crate::repl::events::RuneSource;
use crate::repl::models::Registers;
use crate::repl::text::{CharSearch, Motion, MotionType, TextObject};

use super::core::{LineEditor, ModeState, Transition};

impl<S: RuneSource> LineEditor<S> {
    pub(super) fn visual_key(
        &mut self,
        key: char,
        anchor: usize,
        count: Option<usize>,
    ) -> Result<Transition> {
        if let Some(digit) = key.to_digit(10) {
            if digit != 0 || count.is_some() {
                let count = push_digit(count, digit);
                return Ok(Transition::to(ModeState::Visual { anchor, count }));
            }
        }

        let stay = |anchor| Transition::to(ModeState::Visual { anchor, count: None });
        let Some(action) = self.read_action(key, &[VISUAL_COMMANDS, MOTIONS])? else {
            return Ok(stay(anchor));
        };
        let n = count.unwrap_or(1);
        let cursor = self.buffer.cursor();

        let motion = match action {
            Action::Motion(motion) => motion,
            Action::FindChar { forward, till } => {
                let target = self.input.read_rune()?;
                if is_cancel(target) {
                    return Ok(stay(anchor));
                }
                let search = CharSearch::new(target, forward, till);
                self.last_find = Some(search);
                Motion::FindChar(search)
            }
            Action::RepeatFind { reverse } => match self.last_find {
                Some(search) if reverse => Motion::RepeatFind(search.reversed()),
                Some(search) => Motion::RepeatFind(search),
                None => return Ok(stay(anchor)),
            },
            Action::SwapAnchor => {
                self.buffer.move_to(anchor);
                return Ok(stay(cursor));
            }
            Action::TextObject { include } => {
                let object_key = self.input.read_rune()?;
                let selected = TextObject::from_key(object_key)
                    .and_then(|object| object.select(&self.buffer, cursor, include));
                return Ok(match selected {
                    Some((from, to)) if to > from => {
                        self.buffer.move_to(to - 1);
                        stay(from)
                    }
                    _ => stay(anchor),
                });
            }
            Action::SelectRegister => {
                let name = self.input.read_rune()?;
                if Registers::is_valid_name(name) {
                    self.pending_register = Some(name);
                }
                return Ok(Transition::to(ModeState::Visual { anchor, count }));
            }
            Action::VisualOperator(op) => {
                let range = self.selection(anchor);
                let register = self.pending_register.take();
                let context = OperatorContext::new(op, range.0, None, register);
                return self.apply_operator(context, range, MotionType::Inclusive);
            }
            Action::Cancel => {
                self.pending_register = None;
                return Ok(Transition::normal());
            }
            _ => return Ok(stay(anchor)),
        };

        let result = motion.resolve(&self.buffer, cursor, n);
        if let Some(target) = self.recover(result)? {
            self.buffer.move_to(target);
        }
        Ok(stay(anchor))
    }

    /// Half-open range covering the anchor, the cursor and everything between
    pub(super) fn selection(&self, anchor: usize) -> (usize, usize) {
        let cursor = self.buffer.cursor();
        let from = anchor.min(cursor);
        let to = (anchor.max(cursor) + 1).min(self.buffer.len());
        (from, to)
    }
}

//! Operator-pending mode and applying an operator to a range.

use anyhow::Result;

use crate::repl::commands::registry::{MOTIONS, PENDING_COMMANDS};
use crate::repl::commands::{lookup, push_digit, Action, Lookup, OperatorContext, OperatorType};
use crate::repl::events::keys::{is_cancel, is_printable};
use crate::repl::events::RuneSource;
use crate::repl::text::{is_blank, CharSearch, Motion, MotionType, TextObject};

use super::core::{LineEditor, ModeState, Transition};

impl<S: RuneSource> LineEditor<S> {
    pub(super) fn pending_key(&mut self, key: char, mut context: OperatorContext) -> Result<Transition> {
        if let Some(digit) = key.to_digit(10) {
            if digit != 0 || context.motion_count.is_some() {
                context.motion_count = push_digit(context.motion_count, digit);
                return Ok(Transition::to(ModeState::OperatorPending(context)));
            }
        }

        let len = self.buffer.len();
        let mut keys = key.to_string();
        let action = loop {
            if context.op.is_doubled_by(&keys) {
                return self.apply_operator(context, (0, len), MotionType::Linewise);
            }
            match lookup(&[PENDING_COMMANDS, MOTIONS], &keys) {
                Lookup::Found(action) => break action,
                Lookup::Prefix => keys.push(self.input.read_rune()?),
                Lookup::Missing => {
                    tracing::debug!("{:?} cancelled by {:?}", context.op, keys);
                    return Ok(Transition::normal());
                }
            }
        };

        let count = context.effective_count();
        let motion = match action {
            Action::Motion(motion) => self.adjust_change_word(&context, motion),
            Action::FindChar { forward, till } => {
                let target = self.input.read_rune()?;
                if is_cancel(target) {
                    return Ok(Transition::normal());
                }
                let search = CharSearch::new(target, forward, till);
                self.last_find = Some(search);
                Motion::FindChar(search)
            }
            Action::RepeatFind { reverse } => match self.last_find {
                Some(search) if reverse => Motion::RepeatFind(search.reversed()),
                Some(search) => Motion::RepeatFind(search),
                None => return Ok(Transition::normal()),
            },
            Action::TextObject { include } => {
                let object_key = self.input.read_rune()?;
                let selected = TextObject::from_key(object_key)
                    .and_then(|object| object.select(&self.buffer, context.start, include));
                return match selected {
                    Some(range) => self.apply_operator(context, range, MotionType::Exclusive),
                    None => Ok(Transition::normal()),
                };
            }
            _ => return Ok(Transition::normal()),
        };

        let target = motion.resolve(&self.buffer, context.start, count)?;
        let motion_type = motion.motion_type();
        let range = context.range(target, motion_type, len);
        self.apply_operator(context, range, motion_type)
    }

    /// `cw` on a non-blank stops at the end of the word
    fn adjust_change_word(&self, context: &OperatorContext, motion: Motion) -> Motion {
        match motion {
            Motion::WordForward(kind)
                if context.op == OperatorType::Change
                    && self
                        .buffer
                        .char_at(context.start)
                        .is_some_and(|ch| !is_blank(ch)) =>
            {
                Motion::ChangeWord(kind)
            }
            other => other,
        }
    }

    /// Run `context.op` over `[from, to)` and leave the pending state
    pub(super) fn apply_operator(
        &mut self,
        context: OperatorContext,
        (from, to): (usize, usize),
        motion_type: MotionType,
    ) -> Result<Transition> {
        let linewise = motion_type == MotionType::Linewise;
        let register = context.register;
        tracing::debug!("{:?} over [{}, {}) {:?}", context.op, from, to, motion_type);

        match context.op {
            OperatorType::Delete | OperatorType::Change => {
                if from < to {
                    let text = self.buffer.delete(from, to);
                    self.registers.delete(register, &text, linewise);
                    self.snapshot();
                }
                self.buffer.move_to(from);
                if context.op == OperatorType::Change {
                    return Ok(Transition::to(self.enter_insert()));
                }
            }
            OperatorType::Yank => {
                if from < to {
                    let text = self.buffer.slice(from, to);
                    self.registers.yank(register, &text);
                    if !linewise {
                        self.buffer.move_to(from);
                    }
                }
            }
            OperatorType::Lower | OperatorType::Upper | OperatorType::SwitchCase => {
                let text = self.buffer.slice(from, to);
                if let Some(changed) = context.op.transform(&text) {
                    self.buffer.replace(&changed, from as isize);
                    self.snapshot();
                }
                self.buffer.move_to(from);
            }
            OperatorType::Surround => {
                let delimiter = self.input.read_rune()?;
                if is_cancel(delimiter) || !is_printable(delimiter) {
                    return Ok(Transition::normal());
                }
                self.buffer.siege(from, to, delimiter);
                self.snapshot();
                self.buffer.move_to(from);
            }
        }
        Ok(Transition::normal())
    }
}

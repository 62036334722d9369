//! # Motions
//!
//! Pure cursor-target computations over a [`Buffer`]. A motion never mutates
//! the buffer; it maps a start position and a count to a destination, and
//! carries the inclusivity the operator layer needs to turn that destination
//! into a range.
//!
//! Word motions share the three-class partition from [`char_class`] and are
//! built from `index_func`/`last_index_func` scans with an explicit polarity,
//! so "first position where the class changes" is one scan in each direction.
//!
//! [`char_class`]: super::char_class

use anyhow::Result;

use super::char_class::{classify, is_blank, CharClass, WordKind};
use crate::repl::error::EditorError;
use crate::repl::models::Buffer;

/// How an operator treats the destination of a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionType {
    /// The destination character is part of the range
    Inclusive,
    /// The range stops short of the destination
    Exclusive,
    /// The whole line (the whole buffer) regardless of the motion
    Linewise,
}

/// `f`/`F`/`t`/`T` character search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSearch {
    pub target: char,
    pub forward: bool,
    pub till: bool,
}

impl CharSearch {
    pub fn new(target: char, forward: bool, till: bool) -> Self {
        Self {
            target,
            forward,
            till,
        }
    }

    /// Same search in the opposite direction, used by `,`
    pub fn reversed(self) -> Self {
        Self {
            forward: !self.forward,
            ..self
        }
    }

    pub fn motion_type(&self) -> MotionType {
        if self.forward {
            MotionType::Inclusive
        } else {
            MotionType::Exclusive
        }
    }

    /// Destination of the `count`th match strictly after/before `pos`
    ///
    /// A repeated till search skips the match right next to the cursor so
    /// that `;` after `t` makes progress.
    pub fn resolve(&self, buffer: &Buffer, pos: usize, count: usize, repeat: bool) -> Option<usize> {
        let skip_adjacent = usize::from(self.till && repeat);
        let mut found = pos;

        if self.forward {
            let mut from = pos + 1 + skip_adjacent;
            for _ in 0..count.max(1) {
                found = buffer.index(self.target, from)?;
                from = found + 1;
            }
            Some(if self.till { found - 1 } else { found })
        } else {
            let mut end = pos.saturating_sub(skip_adjacent);
            for _ in 0..count.max(1) {
                found = buffer.last_index(self.target, end)?;
                end = found;
            }
            Some(if self.till { found + 1 } else { found })
        }
    }
}

/// A cursor motion usable from Normal, Visual and Operator-pending mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    LineStart,
    FirstNonBlank,
    LineEnd,
    Column,
    WordForward(WordKind),
    WordBackward(WordKind),
    WordEnd(WordKind),
    WordEndBackward(WordKind),
    /// `cw`/`cW` on a non-blank: like `e` but stays on a word end
    ChangeWord(WordKind),
    FindChar(CharSearch),
    /// `;`/`,`, carrying the search to repeat
    RepeatFind(CharSearch),
}

impl Motion {
    pub fn motion_type(&self) -> MotionType {
        match self {
            Motion::WordEnd(_) | Motion::WordEndBackward(_) | Motion::ChangeWord(_) => {
                MotionType::Inclusive
            }
            Motion::FindChar(search) | Motion::RepeatFind(search) => search.motion_type(),
            _ => MotionType::Exclusive,
        }
    }

    /// Destination of the motion from `pos`, repeated `count` times
    ///
    /// Only character searches can fail; everything else clamps.
    pub fn resolve(&self, buffer: &Buffer, pos: usize, count: usize) -> Result<usize> {
        let count = count.max(1);
        let len = buffer.len();
        let target = match *self {
            Motion::Left => pos.saturating_sub(count),
            Motion::Right => pos.saturating_add(count).min(len),
            Motion::LineStart => 0,
            Motion::FirstNonBlank => first_non_blank(buffer),
            Motion::LineEnd => len,
            Motion::Column => (count - 1).min(len),
            Motion::WordForward(kind) => repeat(pos, count, |p| word_forward(buffer, p, kind)),
            Motion::WordBackward(kind) => repeat(pos, count, |p| word_backward(buffer, p, kind)),
            Motion::WordEnd(kind) => repeat(pos, count, |p| word_end(buffer, p, kind)),
            Motion::WordEndBackward(kind) => {
                repeat(pos, count, |p| word_end_backward(buffer, p, kind))
            }
            Motion::ChangeWord(kind) => {
                let first = current_word_end(buffer, pos, kind);
                repeat(first, count - 1, |p| word_end(buffer, p, kind))
            }
            Motion::FindChar(search) => search
                .resolve(buffer, pos, count, false)
                .ok_or(EditorError::CharNotFound(search.target))?,
            Motion::RepeatFind(search) => search
                .resolve(buffer, pos, count, true)
                .ok_or(EditorError::CharNotFound(search.target))?,
        };
        Ok(target)
    }
}

/// Apply `step` up to `count` times, stopping once it no longer moves
fn repeat<F>(start: usize, count: usize, step: F) -> usize
where
    F: Fn(usize) -> usize,
{
    let mut pos = start;
    for _ in 0..count {
        let next = step(pos);
        if next == pos {
            break;
        }
        pos = next;
    }
    pos
}

fn class_at(buffer: &Buffer, pos: usize, kind: WordKind) -> Option<CharClass> {
    buffer.char_at(pos).map(|ch| classify(ch, kind))
}

/// First non-blank character, or the end of an all-blank line
pub fn first_non_blank(buffer: &Buffer) -> usize {
    buffer
        .index_func(is_blank, 0, false)
        .unwrap_or(buffer.len())
}

/// `w`/`W`: start of the next word, or the end of the buffer
pub fn word_forward(buffer: &Buffer, pos: usize, kind: WordKind) -> usize {
    let len = buffer.len();
    let Some(class) = class_at(buffer, pos, kind) else {
        return len;
    };

    let after_run = if class == CharClass::Whitespace {
        pos
    } else {
        match buffer.index_func(|ch| classify(ch, kind) == class, pos, false) {
            Some(next) => next,
            None => return len,
        }
    };
    buffer
        .index_func(is_blank, after_run, false)
        .unwrap_or(len)
}

/// `b`/`B`: start of the current or previous word
pub fn word_backward(buffer: &Buffer, pos: usize, kind: WordKind) -> usize {
    let Some(last) = buffer.last_index_func(is_blank, pos, false) else {
        return 0;
    };
    let Some(class) = class_at(buffer, last, kind) else {
        return 0;
    };
    buffer
        .last_index_func(|ch| classify(ch, kind) == class, last, false)
        .map_or(0, |boundary| boundary + 1)
}

/// `e`/`E`: end of the next word, always moving at least one position
pub fn word_end(buffer: &Buffer, pos: usize, kind: WordKind) -> usize {
    let len = buffer.len();
    if len == 0 {
        return 0;
    }
    let Some(start) = buffer.index_func(is_blank, pos + 1, false) else {
        return len - 1;
    };
    run_end(buffer, start, kind)
}

/// `ge`/`gE`: end of the previous word
pub fn word_end_backward(buffer: &Buffer, pos: usize, kind: WordKind) -> usize {
    if pos == 0 || buffer.is_empty() {
        return 0;
    }
    let before_run = match class_at(buffer, pos, kind) {
        Some(class) if class != CharClass::Whitespace => {
            match buffer.last_index_func(|ch| classify(ch, kind) == class, pos, false) {
                Some(boundary) => boundary,
                None => return 0,
            }
        }
        _ => (pos - 1).min(buffer.len() - 1),
    };

    match buffer.char_at(before_run) {
        Some(ch) if is_blank(ch) => buffer
            .last_index_func(is_blank, before_run, false)
            .unwrap_or(0),
        _ => before_run,
    }
}

/// Last position of the class run containing `pos`
fn run_end(buffer: &Buffer, pos: usize, kind: WordKind) -> usize {
    let len = buffer.len();
    match class_at(buffer, pos, kind) {
        Some(class) => buffer
            .index_func(|ch| classify(ch, kind) == class, pos, false)
            .map_or(len - 1, |boundary| boundary - 1),
        None => len.saturating_sub(1),
    }
}

/// End of the word under the cursor, staying put when already there
fn current_word_end(buffer: &Buffer, pos: usize, kind: WordKind) -> usize {
    if buffer.is_empty() {
        return 0;
    }
    run_end(buffer, pos.min(buffer.len() - 1), kind)
}

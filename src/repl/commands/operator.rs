//! # Operators
//!
//! Operator kinds and the context an operator carries while it waits for a
//! motion or text object. Applying an operator to a buffer lives with the
//! mode machine; this module only describes the operator and computes the
//! range it will act on.

use crate::repl::text::MotionType;

/// What an operator does to its range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorType {
    Delete,
    Yank,
    Change,
    Lower,
    Upper,
    SwitchCase,
    Surround,
}

impl OperatorType {
    /// Key sequence that starts the operator in Normal mode
    pub fn keys(&self) -> &'static str {
        match self {
            OperatorType::Delete => "d",
            OperatorType::Yank => "y",
            OperatorType::Change => "c",
            OperatorType::Lower => "gu",
            OperatorType::Upper => "gU",
            OperatorType::SwitchCase => "g~",
            OperatorType::Surround => "gs",
        }
    }

    /// Whether `keys`, typed while this operator is pending, doubles it
    ///
    /// Only the identical operator doubles: `dd`, `gugu`, and the vim short
    /// form repeating just the last key (`guu`).
    pub fn is_doubled_by(&self, keys: &str) -> bool {
        let own = self.keys();
        keys == own || (own.len() > 1 && own.ends_with(keys) && keys.len() == 1)
    }

    /// Map text through a case operator, keeping its length
    ///
    /// Characters whose case mapping is not a single character are kept.
    pub fn transform(&self, text: &str) -> Option<String> {
        let map: fn(char) -> char = match self {
            OperatorType::Lower => |ch| single(ch.to_lowercase()).unwrap_or(ch),
            OperatorType::Upper => |ch| single(ch.to_uppercase()).unwrap_or(ch),
            OperatorType::SwitchCase => switch_case,
            _ => return None,
        };
        Some(text.chars().map(map).collect())
    }
}

fn single(mut mapped: impl Iterator<Item = char>) -> Option<char> {
    let first = mapped.next()?;
    mapped.next().is_none().then_some(first)
}

/// Flip the case of one character
pub fn switch_case(ch: char) -> char {
    if ch.is_lowercase() {
        single(ch.to_uppercase()).unwrap_or(ch)
    } else if ch.is_uppercase() {
        single(ch.to_lowercase()).unwrap_or(ch)
    } else {
        ch
    }
}

/// A pending operator waiting for its motion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorContext {
    pub op: OperatorType,
    /// Cursor position when the operator key was pressed
    pub start: usize,
    /// Count typed before the operator
    pub count: Option<usize>,
    /// Count typed between the operator and the motion
    pub motion_count: Option<usize>,
    pub register: Option<char>,
}

impl OperatorContext {
    pub fn new(op: OperatorType, start: usize, count: Option<usize>, register: Option<char>) -> Self {
        Self {
            op,
            start,
            count,
            motion_count: None,
            register,
        }
    }

    /// Operator count times motion count, each defaulting to 1
    pub fn effective_count(&self) -> usize {
        self.count
            .unwrap_or(1)
            .saturating_mul(self.motion_count.unwrap_or(1))
    }

    /// Range covered from `start` to `target`
    ///
    /// Exclusive motions stop before the later position, inclusive ones take
    /// it, and linewise selects the whole buffer.
    pub fn range(&self, target: usize, motion_type: MotionType, len: usize) -> (usize, usize) {
        match motion_type {
            MotionType::Linewise => (0, len),
            MotionType::Exclusive => (self.start.min(target), self.start.max(target).min(len)),
            MotionType::Inclusive => (
                self.start.min(target),
                (self.start.max(target) + 1).min(len),
            ),
        }
    }
}

/// Accumulate a typed digit into an optional count
pub fn push_digit(count: Option<usize>, digit: u32) -> Option<usize> {
    Some(
        count
            .unwrap_or(0)
            .saturating_mul(10)
            .saturating_add(digit as usize),
    )
}

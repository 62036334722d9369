//! # Line Buffer
//!
//! The mutable rune sequence and cursor the editor works on. Every position
//! argument is clamped to `[0, len]`; no operation fails on an out-of-range
//! index. Ranges are half-open and order-independent: `(from, to)` and
//! `(to, from)` name the same span.

use std::fmt;

/// Single-line rune buffer with a cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    content: Vec<char>,
    cursor: usize,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn content(&self) -> &[char] {
        &self.content
    }

    pub fn text(&self) -> String {
        self.content.iter().collect()
    }

    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.content.get(pos).copied()
    }

    /// Replace the whole content, keeping the cursor inside the new bounds
    pub fn set_text(&mut self, text: &str) {
        self.content = text.chars().collect();
        self.cursor = self.cursor.min(self.content.len());
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    fn clamp(&self, pos: usize) -> usize {
        pos.min(self.content.len())
    }

    fn bounds(&self, from: usize, to: usize) -> (usize, usize) {
        let (left, right) = if from <= to { (from, to) } else { (to, from) };
        (self.clamp(left), self.clamp(right))
    }

    /// Set the cursor to `clamp(to, 0, len)`
    pub fn move_to(&mut self, to: usize) {
        self.cursor = self.clamp(to);
    }

    /// Move the cursor by a signed offset, clamping at both ends
    pub fn move_by(&mut self, delta: isize) {
        let target = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta as usize)
        };
        self.move_to(target);
    }

    /// Splice `text` in at `at`; the cursor shifts right if `at <= cursor`
    pub fn insert(&mut self, text: &str, at: usize) {
        let runes: Vec<char> = text.chars().collect();
        self.insert_runes(&runes, at);
    }

    pub fn insert_runes(&mut self, runes: &[char], at: usize) {
        let at = self.clamp(at);
        self.content.splice(at..at, runes.iter().copied());
        if at <= self.cursor {
            self.cursor += runes.len();
        }
    }

    /// Remove `[min(from, to), max(from, to))` and return the removed text
    ///
    /// The cursor stays put when it is left of the span, shifts left by the
    /// span length when it is right of it, and otherwise lands on the span
    /// start.
    pub fn delete(&mut self, from: usize, to: usize) -> String {
        let (left, right) = self.bounds(from, to);
        let removed: String = self.content.drain(left..right).collect();
        if self.cursor > right {
            self.cursor -= right - left;
        } else if self.cursor >= left {
            self.cursor = left;
        }
        removed
    }

    /// Copy of `[min(from, to), max(from, to))`
    pub fn slice(&self, from: usize, to: usize) -> String {
        let (left, right) = self.bounds(from, to);
        self.content[left..right].iter().collect()
    }

    /// Overwrite in place starting at `at`
    ///
    /// Past the end, the gap is padded with spaces. With a negative `at`,
    /// only the part of `text` landing at index 0 or later is written. The
    /// cursor is not touched.
    pub fn replace(&mut self, text: &str, at: isize) {
        let runes: Vec<char> = text.chars().collect();
        let skip = if at < 0 { at.unsigned_abs() } else { 0 };
        let start = at.max(0) as usize;

        if start > self.content.len() {
            self.content.resize(start, ' ');
        }
        for (offset, &rune) in runes.iter().skip(skip).enumerate() {
            let pos = start + offset;
            if pos < self.content.len() {
                self.content[pos] = rune;
            } else {
                self.content.push(rune);
            }
        }
    }

    /// First occurrence of `ch` at or after `start`
    pub fn index(&self, ch: char, start: usize) -> Option<usize> {
        self.index_func(|c| c == ch, start, true)
    }

    /// Last occurrence of `ch` strictly before `end`
    pub fn last_index(&self, ch: char, end: usize) -> Option<usize> {
        self.last_index_func(|c| c == ch, end, true)
    }

    /// First position at or after `start` where `predicate(ch) == want`
    pub fn index_func<F>(&self, predicate: F, start: usize, want: bool) -> Option<usize>
    where
        F: Fn(char) -> bool,
    {
        let start = self.clamp(start);
        self.content[start..]
            .iter()
            .position(|&c| predicate(c) == want)
            .map(|offset| start + offset)
    }

    /// Last position strictly before `end` where `predicate(ch) == want`
    pub fn last_index_func<F>(&self, predicate: F, end: usize, want: bool) -> Option<usize>
    where
        F: Fn(char) -> bool,
    {
        let end = self.clamp(end);
        self.content[..end]
            .iter()
            .rposition(|&c| predicate(c) == want)
    }

    /// First occurrence of `pattern` starting at or after `start`
    pub fn find(&self, pattern: &[char], start: usize) -> Option<usize> {
        if pattern.is_empty() || pattern.len() > self.content.len() {
            return None;
        }
        let last_start = self.content.len() - pattern.len();
        (self.clamp(start)..=last_start).find(|&i| self.content[i..].starts_with(pattern))
    }

    /// Last occurrence of `pattern` starting strictly before `end`
    pub fn rfind(&self, pattern: &[char], end: usize) -> Option<usize> {
        if pattern.is_empty() || pattern.len() > self.content.len() {
            return None;
        }
        let last_start = self.content.len() - pattern.len();
        let upper = self.clamp(end).min(last_start + 1);
        (0..upper)
            .rev()
            .find(|&i| self.content[i..].starts_with(pattern))
    }

    /// Wrap `[from, to)` in a delimiter pair
    ///
    /// Brackets insert the matching open/close counterpart whichever side was
    /// given; any other delimiter (quotes, backtick) is used on both sides.
    pub fn siege(&mut self, from: usize, to: usize, delimiter: char) {
        let (left, right) = self.bounds(from, to);
        let (open, close) = delimiter_pair(delimiter);
        self.insert_runes(&[close], right);
        self.insert_runes(&[open], left);
    }
}

impl From<&str> for Buffer {
    fn from(text: &str) -> Self {
        Self {
            content: text.chars().collect(),
            cursor: 0,
        }
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.content {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

/// Open/close pair for a surround delimiter
pub fn delimiter_pair(delimiter: char) -> (char, char) {
    match delimiter {
        '(' | ')' => ('(', ')'),
        '[' | ']' => ('[', ']'),
        '{' | '}' => ('{', '}'),
        '<' | '>' => ('<', '>'),
        other => (other, other),
    }
}

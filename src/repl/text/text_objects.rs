//! # Text Objects
//!
//! Structural selections around the cursor: words, quoted strings and
//! bracket groups. Each selection is a half-open `(from, to)` range, or
//! `None` when no such object surrounds the cursor.
//!
//! Bracket objects pick the innermost pair enclosing the cursor, found by
//! depth counting outward on both sides.

use super::char_class::{classify, is_blank, CharClass, WordKind};
use crate::repl::models::{delimiter_pair, Buffer};

/// A selectable object, named by the key after `i`/`a`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextObject {
    Word(WordKind),
    Quote(char),
    Bracket { open: char, close: char },
}

impl TextObject {
    /// Object for the key typed after `i`/`a`
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'w' => Some(TextObject::Word(WordKind::Word)),
            'W' => Some(TextObject::Word(WordKind::BigWord)),
            '"' | '\'' | '`' => Some(TextObject::Quote(key)),
            'b' => Some(Self::bracket('(')),
            'B' => Some(Self::bracket('{')),
            '(' | ')' | '[' | ']' | '{' | '}' | '<' | '>' => Some(Self::bracket(key)),
            _ => None,
        }
    }

    fn bracket(key: char) -> Self {
        let (open, close) = delimiter_pair(key);
        TextObject::Bracket { open, close }
    }

    /// Range of the object around `pos`; `include` selects the `a` variant
    pub fn select(&self, buffer: &Buffer, pos: usize, include: bool) -> Option<(usize, usize)> {
        match *self {
            TextObject::Word(kind) => current_word(buffer, pos, kind, include),
            TextObject::Quote(quote) => current_quote(buffer, pos, quote, include),
            TextObject::Bracket { open, close } => {
                current_paren(buffer, pos, open, close, include)
            }
        }
    }
}

/// Word or WORD under the cursor
///
/// On a non-blank, `include` adds the trailing blanks, or the leading ones
/// when there are none. On a blank, `include` extends over the next word.
pub fn current_word(
    buffer: &Buffer,
    pos: usize,
    kind: WordKind,
    include: bool,
) -> Option<(usize, usize)> {
    let len = buffer.len();
    if len == 0 {
        return None;
    }
    let pos = pos.min(len - 1);
    let class = classify(buffer.char_at(pos)?, kind);
    let same = |ch: char| classify(ch, kind) == class;

    let mut from = buffer
        .last_index_func(same, pos, false)
        .map_or(0, |boundary| boundary + 1);
    let mut to = buffer.index_func(same, pos, false).unwrap_or(len);

    if include {
        if class == CharClass::Whitespace {
            if let Some(next) = buffer.char_at(to) {
                let next_class = classify(next, kind);
                to = buffer
                    .index_func(|ch| classify(ch, kind) == next_class, to, false)
                    .unwrap_or(len);
            }
        } else {
            (from, to) = widen_with_blanks(buffer, from, to);
        }
    }
    Some((from, to))
}

/// Quoted string around the cursor
///
/// On a quote character, the quotes before it decide whether it opens or
/// closes the string. Otherwise the nearest quote on each side is used.
pub fn current_quote(
    buffer: &Buffer,
    pos: usize,
    quote: char,
    include: bool,
) -> Option<(usize, usize)> {
    let len = buffer.len();
    if len == 0 {
        return None;
    }
    let pos = pos.min(len - 1);

    let (open, close) = if buffer.char_at(pos) == Some(quote) {
        let before = buffer.content()[..pos]
            .iter()
            .filter(|&&ch| ch == quote)
            .count();
        if before % 2 == 0 {
            (pos, buffer.index(quote, pos + 1)?)
        } else {
            (buffer.last_index(quote, pos)?, pos)
        }
    } else {
        (buffer.last_index(quote, pos)?, buffer.index(quote, pos + 1)?)
    };

    if include {
        Some(widen_with_blanks(buffer, open, close + 1))
    } else {
        Some((open + 1, close))
    }
}

/// Innermost bracket pair enclosing the cursor
pub fn current_paren(
    buffer: &Buffer,
    pos: usize,
    open: char,
    close: char,
    include: bool,
) -> Option<(usize, usize)> {
    let content = buffer.content();
    if content.is_empty() {
        return None;
    }
    let pos = pos.min(content.len() - 1);

    let open_at = if content[pos] == open {
        pos
    } else {
        let mut depth = 0usize;
        let mut found = None;
        for i in (0..pos).rev() {
            if content[i] == close {
                depth += 1;
            } else if content[i] == open {
                if depth == 0 {
                    found = Some(i);
                    break;
                }
                depth -= 1;
            }
        }
        found?
    };

    let mut depth = 0usize;
    let mut close_at = None;
    for (i, &ch) in content.iter().enumerate().skip(open_at + 1) {
        if ch == open {
            depth += 1;
        } else if ch == close {
            if depth == 0 {
                close_at = Some(i);
                break;
            }
            depth -= 1;
        }
    }
    let close_at = close_at?;

    if include {
        Some((open_at, close_at + 1))
    } else {
        Some((open_at + 1, close_at))
    }
}

/// Extend `[from, to)` over trailing blanks, or leading blanks if none trail
fn widen_with_blanks(buffer: &Buffer, from: usize, to: usize) -> (usize, usize) {
    if buffer.char_at(to).is_some_and(is_blank) {
        let end = buffer.index_func(is_blank, to, false).unwrap_or(buffer.len());
        (from, end)
    } else {
        let start = buffer
            .last_index_func(is_blank, from, false)
            .map_or(0, |boundary| boundary + 1);
        (start, to)
    }
}

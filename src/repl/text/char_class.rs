//! # Character Classes
//!
//! Word motions partition characters into three classes: keyword characters
//! (letters, digits, underscore and the Latin-1 accented range), blanks
//! (space and tab), and everything else. `WORD` motions merge keyword and
//! other into a single non-blank class.

/// Class of a character for word motions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    Keyword,
    Other,
}

/// Whether a motion works on `word`s or blank-separated `WORD`s
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    Word,
    BigWord,
}

pub fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

pub fn is_keyword(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ('\u{c0}'..='\u{ff}').contains(&ch)
}

/// Classify `ch` for the given word kind
pub fn classify(ch: char, kind: WordKind) -> CharClass {
    if is_blank(ch) {
        CharClass::Whitespace
    } else if kind == WordKind::BigWord || is_keyword(ch) {
        CharClass::Keyword
    } else {
        CharClass::Other
    }
}

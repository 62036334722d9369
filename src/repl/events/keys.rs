//! # Key Runes
//!
//! The editor consumes runes. Control keys travel as their ASCII control
//! characters so that scripted input and re-injected input look exactly
//! like terminal input.

pub const ESC: char = '\x1b';
pub const ENTER: char = '\r';
pub const NEWLINE: char = '\n';
pub const BACKSPACE: char = '\x7f';
pub const TAB: char = '\t';
pub const CTRL_A: char = '\x01';
pub const CTRL_B: char = '\x02';
pub const CTRL_C: char = '\x03';
pub const CTRL_D: char = '\x04';
pub const CTRL_E: char = '\x05';
pub const CTRL_F: char = '\x06';
pub const CTRL_L: char = '\x0c';
pub const CTRL_N: char = '\x0e';
pub const CTRL_P: char = '\x10';
pub const CTRL_R: char = '\x12';
pub const CTRL_U: char = '\x15';
pub const CTRL_W: char = '\x17';
pub const CTRL_X: char = '\x18';

/// Control rune for a letter, e.g. `ctrl('w')` is Ctrl-W
pub fn ctrl(letter: char) -> char {
    char::from((letter.to_ascii_lowercase() as u8) & 0x1f)
}

pub fn is_enter(key: char) -> bool {
    key == ENTER || key == NEWLINE
}

/// Escape and Ctrl-C both cancel a pending sequence
pub fn is_cancel(key: char) -> bool {
    key == ESC || key == CTRL_C
}

/// Runes that are inserted as text rather than interpreted
pub fn is_printable(key: char) -> bool {
    !key.is_control()
}

/// Human-readable name for a rune, used in help and log output
pub fn describe(key: char) -> String {
    match key {
        ESC => "<Esc>".to_string(),
        ENTER | NEWLINE => "<Enter>".to_string(),
        BACKSPACE => "<BS>".to_string(),
        TAB => "<Tab>".to_string(),
        ' ' => "<Space>".to_string(),
        c if (c as u32) < 0x20 => format!("<C-{}>", char::from(c as u8 + b'a' - 1)),
        c => c.to_string(),
    }
}

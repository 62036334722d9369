//! # Register Store
//!
//! Named storage slots for yanked and deleted text, kept independent of the
//! undo history.
//!
//! - `"` unnamed: mirrors whatever register was written last
//! - `0` last unnamed yank, `1`-`9` linewise delete history, `-` small delete
//! - `a`-`z` named; `A`-`Z` append to the lowercase slot
//! - `_` black hole: writes vanish, reads are empty
//! - `/` last search, `:` last command line, `.` last inserted text
//!   (read-only for yank/delete)

use std::collections::HashMap;

pub const UNNAMED: char = '"';
pub const BLACK_HOLE: char = '_';
pub const SMALL_DELETE: char = '-';
pub const LAST_SEARCH: char = '/';
pub const LAST_COMMAND: char = ':';
pub const LAST_INSERTED: char = '.';
pub const LAST_YANK: char = '0';

/// Register contents keyed by canonical (lowercase) name
#[derive(Debug, Clone, Default)]
pub struct Registers {
    slots: HashMap<char, String>,
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` can follow `"` to select a register
    pub fn is_valid_name(name: char) -> bool {
        name.is_ascii_alphanumeric()
            || matches!(
                name,
                UNNAMED | BLACK_HOLE | SMALL_DELETE | LAST_SEARCH | LAST_COMMAND | LAST_INSERTED
            )
    }

    fn is_read_only(name: char) -> bool {
        matches!(name, LAST_SEARCH | LAST_COMMAND | LAST_INSERTED)
    }

    /// Contents of a register; the black hole and empty slots read as `None`
    pub fn get(&self, name: char) -> Option<&str> {
        if name == BLACK_HOLE {
            return None;
        }
        self.slots
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Yank `text` into `name` (or the default slots when `None`)
    pub fn yank(&mut self, name: Option<char>, text: &str) {
        match name {
            None | Some(UNNAMED) => {
                self.slots.insert(LAST_YANK, text.to_string());
                self.slots.insert(UNNAMED, text.to_string());
            }
            Some(name) => self.write_named(name, text),
        }
    }

    /// Record deleted text in `name` (or the default slots when `None`)
    pub fn delete(&mut self, name: Option<char>, text: &str, linewise: bool) {
        match name {
            None | Some(UNNAMED) => {
                if linewise {
                    self.shift_numbered(text);
                } else {
                    self.slots.insert(SMALL_DELETE, text.to_string());
                }
                self.slots.insert(UNNAMED, text.to_string());
            }
            Some(name) => self.write_named(name, text),
        }
    }

    /// Store the last search pattern (`/`)
    pub fn set_last_search(&mut self, pattern: &str) {
        self.slots.insert(LAST_SEARCH, pattern.to_string());
    }

    /// Store the last executed command line (`:`)
    pub fn set_last_command(&mut self, command: &str) {
        self.slots.insert(LAST_COMMAND, command.to_string());
    }

    /// Store the text typed in the last insert session (`.`)
    pub fn set_last_inserted(&mut self, text: &str) {
        self.slots.insert(LAST_INSERTED, text.to_string());
    }

    fn write_named(&mut self, name: char, text: &str) {
        if name == BLACK_HOLE {
            return;
        }
        if !Self::is_valid_name(name) || Self::is_read_only(name) {
            tracing::debug!("ignoring write to register {:?}", name);
            return;
        }

        let slot = name.to_ascii_lowercase();
        let content = if name.is_ascii_uppercase() {
            let entry = self.slots.entry(slot).or_default();
            entry.push_str(text);
            entry.clone()
        } else {
            self.slots.insert(slot, text.to_string());
            text.to_string()
        };
        self.slots.insert(UNNAMED, content);
    }

    fn shift_numbered(&mut self, text: &str) {
        for n in (1..9u8).rev() {
            let from = char::from(b'0' + n);
            let to = char::from(b'0' + n + 1);
            if let Some(previous) = self.slots.remove(&from) {
                self.slots.insert(to, previous);
            }
        }
        self.slots.insert('1', text.to_string());
    }
}

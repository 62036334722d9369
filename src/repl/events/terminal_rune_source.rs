//! Terminal Rune Source Implementation
//!
//! Production implementation of [`RuneSource`] that uses crossterm to read
//! key events from the terminal and translate them to runes.

use super::keys;
use super::rune_source::RuneSource;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Production rune source reading the terminal via crossterm
#[derive(Debug, Default)]
pub struct TerminalRuneSource;

impl TerminalRuneSource {
    pub fn new() -> Self {
        Self
    }
}

impl RuneSource for TerminalRuneSource {
    fn read_rune(&mut self) -> Result<char> {
        loop {
            match event::read()? {
                Event::Key(key_event) => {
                    if let Some(rune) = key_to_rune(key_event) {
                        return Ok(rune);
                    }
                    tracing::trace!("ignoring unmapped key event: {:?}", key_event);
                }
                other => {
                    tracing::trace!("ignoring non-key event: {:?}", other);
                }
            }
        }
    }
}

/// Translate a crossterm key event to the rune the editor understands
///
/// Arrow keys map to the emacs-style control keys the editor already binds
/// (Ctrl-B/F left/right, Ctrl-P/N up/down). Key releases are dropped.
pub fn key_to_rune(event: KeyEvent) -> Option<char> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    match event.code {
        KeyCode::Char(ch) if event.modifiers.contains(KeyModifiers::CONTROL) => {
            if ch.is_ascii_alphabetic() {
                Some(keys::ctrl(ch))
            } else if ch == '[' {
                Some(keys::ESC)
            } else {
                None
            }
        }
        KeyCode::Char(ch) => Some(ch),
        KeyCode::Enter => Some(keys::ENTER),
        KeyCode::Esc => Some(keys::ESC),
        KeyCode::Backspace => Some(keys::BACKSPACE),
        KeyCode::Tab => Some(keys::TAB),
        KeyCode::Left => Some(keys::CTRL_B),
        KeyCode::Right => Some(keys::CTRL_F),
        KeyCode::Up => Some(keys::CTRL_P),
        KeyCode::Down => Some(keys::CTRL_N),
        KeyCode::Home => Some(keys::CTRL_A),
        KeyCode::End => Some(keys::CTRL_E),
        KeyCode::Delete => Some(keys::CTRL_D),
        _ => None,
    }
}

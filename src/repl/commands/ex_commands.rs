//! # Ex Commands Module
//!
//! Commands typed after `:`. The line is split into tokens, the first token
//! names the command and the rest are its arguments. A name resolves to the
//! first command in table order it is a prefix of, so `:d` is `:delete` and
//! `:s` is `:substitute`.

use anyhow::Result;
use regex::Regex;

use crate::repl::commands::registry::describe_keys;
use crate::repl::error::EditorError;
use crate::repl::models::{Buffer, Registers, UndoTree};

/// Whether the editor keeps reading after an Ex command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuity {
    Continue,
    Quit,
}

/// Editor state an Ex command may act on
pub struct ExTarget<'a> {
    pub buffer: &'a mut Buffer,
    pub registers: &'a mut Registers,
    pub undo: &'a mut UndoTree,
    pub status: &'a mut Option<String>,
}

/// Trait for ex commands
pub trait ExCommand {
    /// Full command name; any prefix of it selects the command
    fn name(&self) -> &'static str;

    /// One-line usage shown by `:help`
    fn usage(&self) -> &'static str;

    fn execute(&self, target: &mut ExTarget<'_>, args: &[String]) -> Result<Continuity>;
}

/// Split an Ex command line into words
///
/// Bare words end at whitespace. A `"` starts a quoted word in which `\"`,
/// `\\` and `\n` are escapes; an unterminated quote runs to end of line.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let mut token = String::new();
        if ch == '"' {
            chars.next();
            while let Some(ch) = chars.next() {
                match ch {
                    '"' => break,
                    '\\' => match chars.next() {
                        Some('n') => token.push('\n'),
                        Some(escaped @ ('"' | '\\')) => token.push(escaped),
                        Some(other) => {
                            token.push('\\');
                            token.push(other);
                        }
                        None => token.push('\\'),
                    },
                    other => token.push(other),
                }
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                token.push(ch);
                chars.next();
            }
        }
        tokens.push(token);
    }
    tokens
}

/// `:help [keys]`
pub struct HelpCommand {
    topics: Vec<String>,
}

impl ExCommand for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn usage(&self) -> &'static str {
        ":help [keys]"
    }

    fn execute(&self, target: &mut ExTarget<'_>, args: &[String]) -> Result<Continuity> {
        let message = match args.first() {
            None => self.topics.join("  "),
            Some(topic) => match describe_keys(topic) {
                Some(text) => text,
                None => {
                    tracing::warn!("no help for {:?}", topic);
                    format!("E149: Sorry, no help for {topic}")
                }
            },
        };
        *target.status = Some(message);
        Ok(Continuity::Continue)
    }
}

/// `:delete [x]`, a linewise delete of the whole line
pub struct DeleteCommand;

impl ExCommand for DeleteCommand {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn usage(&self) -> &'static str {
        ":delete [x]"
    }

    fn execute(&self, target: &mut ExTarget<'_>, args: &[String]) -> Result<Continuity> {
        let register = args.first().and_then(|arg| arg.chars().next());
        let text = target.buffer.text();
        target.registers.delete(register, &text, true);
        target.buffer.clear();
        target.undo.add_if_changed("");
        Ok(Continuity::Continue)
    }
}

/// `:quit`
pub struct QuitCommand;

impl ExCommand for QuitCommand {
    fn name(&self) -> &'static str {
        "quit"
    }

    fn usage(&self) -> &'static str {
        ":quit"
    }

    fn execute(&self, _target: &mut ExTarget<'_>, _args: &[String]) -> Result<Continuity> {
        Ok(Continuity::Quit)
    }
}

/// `:substitute PATTERN REPLACEMENT [g]`
pub struct SubstituteCommand;

impl ExCommand for SubstituteCommand {
    fn name(&self) -> &'static str {
        "substitute"
    }

    fn usage(&self) -> &'static str {
        ":substitute PATTERN REPLACEMENT [g]"
    }

    fn execute(&self, target: &mut ExTarget<'_>, args: &[String]) -> Result<Continuity> {
        let (pattern, replacement) = match args {
            [pattern, replacement, ..] => (pattern, replacement.as_str()),
            [pattern] => (pattern, ""),
            [] => return Err(EditorError::NoPreviousPattern.into()),
        };
        let global = args.get(2).is_some_and(|flag| flag == "g");

        let regex =
            Regex::new(pattern).map_err(|e| EditorError::InvalidPattern(e.to_string()))?;
        let text = target.buffer.text();
        if !regex.is_match(&text) {
            return Err(EditorError::PatternNotFound(pattern.clone()).into());
        }

        let replaced = if global {
            regex.replace_all(&text, replacement)
        } else {
            regex.replace(&text, replacement)
        };
        target.buffer.set_text(&replaced);
        target.undo.add_if_changed(&replaced);
        Ok(Continuity::Continue)
    }
}

type ExCommandCollection = Vec<Box<dyn ExCommand>>;

/// Registry for managing ex commands
pub struct ExCommandRegistry {
    commands: ExCommandCollection,
}

impl ExCommandRegistry {
    /// Create a new ex command registry with all default commands
    pub fn new() -> Self {
        let others: ExCommandCollection = vec![
            Box::new(DeleteCommand),
            Box::new(QuitCommand),
            Box::new(SubstituteCommand),
        ];
        let mut topics = vec![":help [keys]".to_string()];
        topics.extend(others.iter().map(|command| command.usage().to_string()));

        let mut commands: ExCommandCollection = vec![Box::new(HelpCommand { topics })];
        commands.extend(others);
        Self { commands }
    }

    /// First command, in table order, whose name starts with `name`
    pub fn resolve(&self, name: &str) -> Option<&dyn ExCommand> {
        if name.is_empty() {
            return None;
        }
        self.commands
            .iter()
            .find(|command| command.name().starts_with(name))
            .map(|command| command.as_ref())
    }

    /// Parse and execute an ex command line
    pub fn execute_line(&self, line: &str, target: &mut ExTarget<'_>) -> Result<Continuity> {
        let tokens = tokenize(line);
        let Some((name, args)) = tokens.split_first() else {
            return Ok(Continuity::Continue);
        };

        match self.resolve(name) {
            Some(command) => {
                tracing::debug!("ex command {:?} handled by {}", line, command.name());
                command.execute(target, args)
            }
            None => {
                tracing::warn!("unknown ex command: {}", name);
                Err(EditorError::UnknownCommand(name.clone()).into())
            }
        }
    }
}

impl Default for ExCommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        buffer: Buffer,
        registers: Registers,
        undo: UndoTree,
        status: Option<String>,
    }

    impl Fixture {
        fn new(text: &str) -> Self {
            Self {
                buffer: Buffer::from(text),
                registers: Registers::new(),
                undo: UndoTree::new(),
                status: None,
            }
        }

        fn run(&mut self, line: &str) -> Result<Continuity> {
            let mut target = ExTarget {
                buffer: &mut self.buffer,
                registers: &mut self.registers,
                undo: &mut self.undo,
                status: &mut self.status,
            };
            ExCommandRegistry::new().execute_line(line, &mut target)
        }
    }

    #[test]
    fn tokenize_should_split_words_and_quotes() {
        assert_eq!(tokenize("s foo bar g"), ["s", "foo", "bar", "g"]);
        assert_eq!(tokenize(r#"s "a b" "c\"d\\e\nf""#), ["s", "a b", "c\"d\\e\nf"]);
        assert_eq!(tokenize("  "), Vec::<String>::new());
        assert_eq!(tokenize(r#"s "unterminated quote"#), ["s", "unterminated quote"]);
        assert_eq!(tokenize(r#"s "" x"#), ["s", "", "x"]);
    }

    #[test]
    fn resolve_should_use_table_order_for_prefixes() {
        let registry = ExCommandRegistry::new();
        let name = |word: &str| registry.resolve(word).map(|command| command.name());
        assert_eq!(name("h"), Some("help"));
        assert_eq!(name("d"), Some("delete"));
        assert_eq!(name("q"), Some("quit"));
        assert_eq!(name("s"), Some("substitute"));
        assert_eq!(name("sub"), Some("substitute"));
        assert_eq!(name("x"), None);
        assert_eq!(name("quitter"), None);
    }

    #[test]
    fn quit_should_signal_exit() -> Result<()> {
        let mut fixture = Fixture::new("abc");
        assert_eq!(fixture.run("q")?, Continuity::Quit);
        assert_eq!(fixture.run("")?, Continuity::Continue);
        Ok(())
    }

    #[test]
    fn unknown_command_should_be_named_in_the_error() {
        let mut fixture = Fixture::new("");
        let err = fixture.run("frobnicate now").unwrap_err();
        assert_eq!(err.to_string(), "E492: Not an editor command: frobnicate");
    }

    #[test]
    fn substitute_should_replace_first_or_all_matches() -> Result<()> {
        let mut fixture = Fixture::new("foo foo");
        fixture.run("s foo bar")?;
        assert_eq!(fixture.buffer.text(), "bar foo");
        fixture.run("s o 0 g")?;
        assert_eq!(fixture.buffer.text(), "bar f00");
        assert_eq!(fixture.undo.undo().as_deref(), Some("bar foo"));
        Ok(())
    }

    #[test]
    fn substitute_should_report_misses_and_bad_patterns() {
        let mut fixture = Fixture::new("abc");
        let err = fixture.run("s xyz q").unwrap_err();
        assert_eq!(
            err.downcast_ref::<EditorError>(),
            Some(&EditorError::PatternNotFound("xyz".to_string()))
        );
        let err = fixture.run("s ( q").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EditorError>(),
            Some(EditorError::InvalidPattern(_))
        ));
        assert_eq!(fixture.buffer.text(), "abc");
    }

    #[test]
    fn delete_should_clear_line_into_register() -> Result<()> {
        let mut fixture = Fixture::new("echo hi");
        fixture.run("delete a")?;
        assert_eq!(fixture.buffer.text(), "");
        assert_eq!(fixture.registers.get('a'), Some("echo hi"));
        assert_eq!(fixture.undo.current_data(), "");
        Ok(())
    }

    #[test]
    fn unnamed_delete_should_shift_numbered_registers() -> Result<()> {
        let mut fixture = Fixture::new("echo hi");
        fixture.run("d")?;
        assert_eq!(fixture.registers.get('1'), Some("echo hi"));
        assert_eq!(fixture.registers.get('"'), Some("echo hi"));
        Ok(())
    }

    #[test]
    fn help_should_describe_keys_or_complain() -> Result<()> {
        let mut fixture = Fixture::new("");
        fixture.run("help w")?;
        assert_eq!(fixture.status.as_deref(), Some("w (motion): word forward"));
        fixture.run("help nothing")?;
        assert_eq!(
            fixture.status.as_deref(),
            Some("E149: Sorry, no help for nothing")
        );
        fixture.run("h")?;
        assert!(fixture.status.as_deref().is_some_and(|s| s.contains(":substitute")));
        Ok(())
    }
}

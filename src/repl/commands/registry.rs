//! # Key Binding Tables
//!
//! Static tables mapping key sequences to editor actions, one per mode
//! family. The mode handlers look keys up here instead of hard-coding them,
//! and `:help` reads the same tables for its descriptions.
//!
//! A lookup either finds an action, reports that the keys so far are the
//! prefix of a longer binding (`g` before `ge`), or finds nothing.

use crate::repl::commands::OperatorType;
use crate::repl::events::keys::describe;
use crate::repl::events::SearchDirection;
use crate::repl::text::{Motion, WordKind};

/// Where `i`/`a`/`I`/`A` put the cursor before inserting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    Cursor,
    AfterCursor,
    FirstNonBlank,
    LineEnd,
}

/// Action bound to a key sequence in Normal, Visual or Operator-pending mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(Motion),
    /// `f`/`F`/`t`/`T`, followed by the target character
    FindChar { forward: bool, till: bool },
    /// `;` and `,`
    RepeatFind { reverse: bool },
    Operator(OperatorType),
    /// Keys re-injected in place of the binding (`x` is `dl`)
    Alias(&'static str),
    Insert(InsertAt),
    ReplaceChar,
    SwitchCaseChar,
    Put { before: bool },
    Undo,
    Redo,
    Earlier,
    Later,
    SelectRegister,
    VisualMode,
    CommandLine,
    Search(SearchDirection),
    SearchNext { reverse: bool },
    HistoryBack,
    HistoryForward,
    Submit,
    Cancel,
    /// `i`/`a` before an object key
    TextObject { include: bool },
    SwapAnchor,
    VisualOperator(OperatorType),
}

/// Editing action shared by Insert mode and the command-line prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Backspace,
    DeleteWord,
    DeleteToStart,
    Left,
    Right,
    LineStart,
    LineEnd,
    HistoryBack,
    HistoryForward,
    /// Ctrl-X, followed by the completion kind
    Expand,
    CompletePath,
    Submit,
    Leave,
}

#[derive(Debug, Clone, Copy)]
pub struct Binding<A> {
    pub keys: &'static str,
    pub action: A,
    pub help: &'static str,
}

impl<A> Binding<A> {
    /// Keys spelled for humans, e.g. `<C-w>`
    pub fn display(&self) -> String {
        self.keys.chars().map(describe).collect()
    }
}

/// Result of looking up a key sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<A> {
    Found(A),
    Prefix,
    Missing,
}

const fn bind<A>(keys: &'static str, action: A, help: &'static str) -> Binding<A> {
    Binding { keys, action, help }
}

const W: WordKind = WordKind::Word;
const BIG: WordKind = WordKind::BigWord;

pub static MOTIONS: &[Binding<Action>] = &[
    bind("h", Action::Motion(Motion::Left), "left"),
    bind("\x02", Action::Motion(Motion::Left), "left"),
    bind("l", Action::Motion(Motion::Right), "right"),
    bind(" ", Action::Motion(Motion::Right), "right"),
    bind("\x06", Action::Motion(Motion::Right), "right"),
    bind("0", Action::Motion(Motion::LineStart), "to start of line"),
    bind("\x01", Action::Motion(Motion::LineStart), "to start of line"),
    bind("^", Action::Motion(Motion::FirstNonBlank), "to first non-blank character"),
    bind("$", Action::Motion(Motion::LineEnd), "to end of line"),
    bind("\x05", Action::Motion(Motion::LineEnd), "to end of line"),
    bind("|", Action::Motion(Motion::Column), "to column N"),
    bind("w", Action::Motion(Motion::WordForward(W)), "word forward"),
    bind("W", Action::Motion(Motion::WordForward(BIG)), "blank-separated WORD forward"),
    bind("b", Action::Motion(Motion::WordBackward(W)), "word backward"),
    bind("B", Action::Motion(Motion::WordBackward(BIG)), "WORD backward"),
    bind("e", Action::Motion(Motion::WordEnd(W)), "forward to end of word"),
    bind("E", Action::Motion(Motion::WordEnd(BIG)), "forward to end of WORD"),
    bind("ge", Action::Motion(Motion::WordEndBackward(W)), "backward to end of word"),
    bind("gE", Action::Motion(Motion::WordEndBackward(BIG)), "backward to end of WORD"),
    bind("f", Action::FindChar { forward: true, till: false }, "to next occurrence of {char}"),
    bind("F", Action::FindChar { forward: false, till: false }, "to previous occurrence of {char}"),
    bind("t", Action::FindChar { forward: true, till: true }, "till before next {char}"),
    bind("T", Action::FindChar { forward: false, till: true }, "till after previous {char}"),
    bind(";", Action::RepeatFind { reverse: false }, "repeat last f/F/t/T"),
    bind(",", Action::RepeatFind { reverse: true }, "repeat last f/F/t/T reversed"),
];

pub static NORMAL_COMMANDS: &[Binding<Action>] = &[
    bind("d", Action::Operator(OperatorType::Delete), "delete {motion}"),
    bind("y", Action::Operator(OperatorType::Yank), "yank {motion}"),
    bind("c", Action::Operator(OperatorType::Change), "change {motion}"),
    bind("gu", Action::Operator(OperatorType::Lower), "lowercase {motion}"),
    bind("gU", Action::Operator(OperatorType::Upper), "uppercase {motion}"),
    bind("g~", Action::Operator(OperatorType::SwitchCase), "switch case of {motion}"),
    bind("gs", Action::Operator(OperatorType::Surround), "surround {motion} with {char}"),
    bind("x", Action::Alias("dl"), "delete character under cursor"),
    bind("X", Action::Alias("dh"), "delete character before cursor"),
    bind("D", Action::Alias("d$"), "delete to end of line"),
    bind("C", Action::Alias("c$"), "change to end of line"),
    bind("s", Action::Alias("cl"), "substitute character"),
    bind("S", Action::Alias("cc"), "substitute line"),
    bind("Y", Action::Alias("yy"), "yank line"),
    bind("i", Action::Insert(InsertAt::Cursor), "insert before cursor"),
    bind("a", Action::Insert(InsertAt::AfterCursor), "append after cursor"),
    bind("I", Action::Insert(InsertAt::FirstNonBlank), "insert before first non-blank"),
    bind("A", Action::Insert(InsertAt::LineEnd), "append at end of line"),
    bind("r", Action::ReplaceChar, "replace character with {char}"),
    bind("~", Action::SwitchCaseChar, "switch case of character and advance"),
    bind("p", Action::Put { before: false }, "put after cursor"),
    bind("P", Action::Put { before: true }, "put before cursor"),
    bind("u", Action::Undo, "undo"),
    bind("\x12", Action::Redo, "redo"),
    bind("g-", Action::Earlier, "go to older text state"),
    bind("g+", Action::Later, "go to newer text state"),
    bind("\"", Action::SelectRegister, "use register {name} for next yank, delete or put"),
    bind("v", Action::VisualMode, "start visual mode"),
    bind(":", Action::CommandLine, "enter command-line mode"),
    bind("/", Action::Search(SearchDirection::Forward), "search forward"),
    bind("?", Action::Search(SearchDirection::Backward), "search backward"),
    bind("n", Action::SearchNext { reverse: false }, "repeat last search"),
    bind("N", Action::SearchNext { reverse: true }, "repeat last search reversed"),
    bind("k", Action::HistoryBack, "previous history line"),
    bind("\x10", Action::HistoryBack, "previous history line"),
    bind("j", Action::HistoryForward, "next history line"),
    bind("\x0e", Action::HistoryForward, "next history line"),
    bind("\r", Action::Submit, "execute line"),
    bind("\n", Action::Submit, "execute line"),
    bind("\x1b", Action::Cancel, "cancel pending count or register"),
    bind("\x03", Action::Cancel, "cancel pending count or register"),
];

pub static VISUAL_COMMANDS: &[Binding<Action>] = &[
    bind("o", Action::SwapAnchor, "go to other end of selection"),
    bind("i", Action::TextObject { include: false }, "select inner object"),
    bind("a", Action::TextObject { include: true }, "select an object"),
    bind("d", Action::VisualOperator(OperatorType::Delete), "delete selection"),
    bind("x", Action::VisualOperator(OperatorType::Delete), "delete selection"),
    bind("y", Action::VisualOperator(OperatorType::Yank), "yank selection"),
    bind("c", Action::VisualOperator(OperatorType::Change), "change selection"),
    bind("s", Action::VisualOperator(OperatorType::Change), "change selection"),
    bind("u", Action::VisualOperator(OperatorType::Lower), "lowercase selection"),
    bind("U", Action::VisualOperator(OperatorType::Upper), "uppercase selection"),
    bind("~", Action::VisualOperator(OperatorType::SwitchCase), "switch case of selection"),
    bind("S", Action::VisualOperator(OperatorType::Surround), "surround selection with {char}"),
    bind("\"", Action::SelectRegister, "use register for next operator"),
    bind("v", Action::Cancel, "leave visual mode"),
    bind("\x1b", Action::Cancel, "leave visual mode"),
    bind("\x03", Action::Cancel, "leave visual mode"),
];

pub static PENDING_COMMANDS: &[Binding<Action>] = &[
    bind("i", Action::TextObject { include: false }, "inner object"),
    bind("a", Action::TextObject { include: true }, "an object"),
    bind("\x1b", Action::Cancel, "cancel operator"),
    bind("\x03", Action::Cancel, "cancel operator"),
];

pub static EDIT_KEYS: &[Binding<EditAction>] = &[
    bind("\x7f", EditAction::Backspace, "delete character before cursor"),
    bind("\x08", EditAction::Backspace, "delete character before cursor"),
    bind("\x17", EditAction::DeleteWord, "delete word before cursor"),
    bind("\x15", EditAction::DeleteToStart, "delete to start of line"),
    bind("\x02", EditAction::Left, "left"),
    bind("\x06", EditAction::Right, "right"),
    bind("\x01", EditAction::LineStart, "to start of line"),
    bind("\x05", EditAction::LineEnd, "to end of line"),
    bind("\x10", EditAction::HistoryBack, "previous history line"),
    bind("\x0e", EditAction::HistoryForward, "next history line"),
    bind("\x18", EditAction::Expand, "complete: <C-f> path, <C-l> whole line"),
    bind("\t", EditAction::CompletePath, "complete path"),
    bind("\r", EditAction::Submit, "execute line"),
    bind("\n", EditAction::Submit, "execute line"),
    bind("\x1b", EditAction::Leave, "leave insert mode"),
    bind("\x03", EditAction::Leave, "leave insert mode"),
];

/// Look `keys` up in `tables`, earlier tables first
pub fn lookup<A: Copy>(tables: &[&[Binding<A>]], keys: &str) -> Lookup<A> {
    let mut prefix = false;
    for table in tables {
        for binding in table.iter() {
            if binding.keys == keys {
                return Lookup::Found(binding.action);
            }
            prefix |= binding.keys.len() > keys.len() && binding.keys.starts_with(keys);
        }
    }
    if prefix {
        Lookup::Prefix
    } else {
        Lookup::Missing
    }
}

/// Look up a single key in the insert/prompt editing table
pub fn edit_action(key: char) -> Option<EditAction> {
    EDIT_KEYS
        .iter()
        .find(|binding| binding.keys.chars().eq(std::iter::once(key)))
        .map(|binding| binding.action)
}

/// `:help` text for a key sequence, matched raw or by its display name
pub fn describe_keys(topic: &str) -> Option<String> {
    let sections: [(&str, &[Binding<Action>]); 4] = [
        ("normal", NORMAL_COMMANDS),
        ("motion", MOTIONS),
        ("visual", VISUAL_COMMANDS),
        ("operator-pending", PENDING_COMMANDS),
    ];
    for (section, table) in sections {
        if let Some(binding) = table
            .iter()
            .find(|b| b.keys == topic || b.display() == topic)
        {
            return Some(format!("{} ({}): {}", binding.display(), section, binding.help));
        }
    }
    EDIT_KEYS
        .iter()
        .find(|b| b.keys == topic || b.display() == topic)
        .map(|b| format!("{} (insert): {}", b.display(), b.help))
}

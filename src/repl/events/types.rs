//! # Core Event Types
//!
//! Small value types shared by the input layer, the mode machine and the
//! renderer.

/// Editor mode (vim-style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorMode {
    Normal,
    Insert,
    /// Character-wise selection from an anchor to the cursor
    Visual,
    /// An operator is waiting for its motion or text object
    OperatorPending,
    /// `:` sub-buffer for Ex commands
    CommandLine,
    /// `/` or `?` sub-buffer for a literal search
    Search,
}

impl EditorMode {
    /// Mode indicator shown on the status line when nothing else is
    pub fn indicator(&self) -> Option<&'static str> {
        match self {
            EditorMode::Insert => Some("-- INSERT --"),
            EditorMode::Visual => Some("-- VISUAL --"),
            _ => None,
        }
    }

    /// Whether the terminal cursor belongs to the status line
    pub fn edits_status_line(&self) -> bool {
        matches!(self, EditorMode::CommandLine | EditorMode::Search)
    }
}

/// Direction for searches and character finds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchDirection {
    Forward,
    Backward,
}

impl SearchDirection {
    pub fn reverse(self) -> Self {
        match self {
            SearchDirection::Forward => SearchDirection::Backward,
            SearchDirection::Backward => SearchDirection::Forward,
        }
    }

    /// The key that opens a search in this direction
    pub fn prompt_char(self) -> char {
        match self {
            SearchDirection::Forward => '/',
            SearchDirection::Backward => '?',
        }
    }
}

/// What a single step of the mode machine asks of the line loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Keep reading keys for the current line
    Continue,
    /// Hand the buffer to the evaluator
    LineComplete,
    /// Stop the REPL (`:quit`)
    Abort,
}

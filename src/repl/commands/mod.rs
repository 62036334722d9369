//! # Commands Module
//!
//! Operator definitions, the static key binding tables the mode handlers
//! dispatch through, and the Ex commands reachable from `:`.

pub mod ex_commands;
pub mod operator;
pub mod registry;

pub use ex_commands::{tokenize, Continuity, ExCommand, ExCommandRegistry, ExTarget};
pub use operator::{push_digit, switch_case, OperatorContext, OperatorType};
pub use registry::{edit_action, lookup, Action, Binding, EditAction, InsertAt, Lookup};

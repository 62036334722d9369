//! # Controllers Module
//!
//! The shell loop that drives the editor and hands finished lines to the
//! evaluator.

pub mod shell;

pub use shell::Shell;

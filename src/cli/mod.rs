//! CLI module for mindcheck
//!
//! Handles command-line argument parsing and answers files.

pub mod answers_file;
pub mod args;

pub use args::{parse_assignments, Args, Commands, Verbosity};

//! Slash commands available while answering the questionnaire
//!
//! Anything that does not start with `/` is an answer to the current field.

use crate::form::{field, FieldSpec};

/// REPL command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// Print the answers given so far
    Show,
    /// Clear the previous answer and ask it again
    Back,
    /// Clear one field and ask it again
    Edit { field: &'static FieldSpec },
    Submit,
    /// Empty form, no result
    Reset,
    Clear,
    Exit,
    Unknown { input: String },
}

impl Command {
    /// Commands that start from a clean screen
    pub fn clears_screen(&self) -> bool {
        matches!(self, Command::Reset | Command::Clear)
    }
}

/// Parse input string into a command
pub fn parse(input: &str) -> Command {
    let trimmed = input.trim();
    let unknown = || Command::Unknown { input: trimmed.to_string() };

    let Some(body) = trimmed.strip_prefix('/') else {
        return unknown();
    };
    let parts: Vec<&str> = body.split_whitespace().collect();
    let Some(name) = parts.first() else {
        return unknown();
    };

    match name.to_lowercase().as_str() {
        "help" | "h" => Command::Help,
        "show" | "answers" => Command::Show,
        "back" | "b" => Command::Back,
        "edit" | "e" => match parts.get(1).and_then(|name| field(name)) {
            Some(field) => Command::Edit { field },
            None => unknown(),
        },
        "submit" | "s" => Command::Submit,
        "reset" | "new" => Command::Reset,
        "clear" | "cls" => Command::Clear,
        "exit" | "quit" | "q" => Command::Exit,
        _ => unknown(),
    }
}

/// Check if input is a command (starts with /)
pub fn is_command(input: &str) -> bool {
    input.trim().starts_with('/')
}

/// Help table shown by `/help`
pub fn help_entries() -> &'static [(&'static str, &'static str)] {
    &[
        ("/help, /h", "Show this help message"),
        ("/show", "Show the answers given so far"),
        ("/back, /b", "Answer the previous question again"),
        ("/edit FIELD", "Answer one question again (e.g. /edit sleep_hours)"),
        ("/submit, /s", "Submit the answers"),
        ("/reset, /new", "Start a new assessment"),
        ("/clear, /cls", "Clear screen"),
        ("/exit, /quit, /q", "Exit"),
    ]
}

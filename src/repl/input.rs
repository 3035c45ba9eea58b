//! Input handler for the questionnaire using rustyline
//!
//! Provides line editing and persistent history.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::DefaultEditor;
use std::path::PathBuf;

pub const DEFAULT_PROMPT: &str = "mindcheck> ";

/// One read from the terminal
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A line, trimmed
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D
    Eof,
}

impl Input {
    /// Map a readline outcome; anything other than interrupt or EOF is an error
    pub fn from_readline(outcome: Result<String, ReadlineError>) -> Result<Self> {
        match outcome {
            Ok(line) => Ok(Input::Line(line.trim().to_string())),
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(err) => Err(anyhow::anyhow!("Readline error: {}", err)),
        }
    }
}

/// Input handler managing readline interface and history
pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl InputHandler {
    pub fn new() -> Result<Self> {
        Ok(InputHandler {
            editor: DefaultEditor::new()?,
            history_path: None,
        })
    }

    /// Create input handler with persistent history
    ///
    /// History file: ~/.mindcheck_history
    pub fn with_history(history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(InputHandler {
            editor,
            history_path: Some(history_file),
        })
    }

    /// Default history location, if a home directory exists
    pub fn default_history_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".mindcheck_history"))
    }

    /// Read a line with the default prompt
    pub fn read_line(&mut self) -> Result<Input> {
        self.read_with_prompt(DEFAULT_PROMPT)
    }

    /// Read a line of input from user; non-empty lines go into history
    pub fn read_with_prompt(&mut self, prompt: &str) -> Result<Input> {
        let input = Input::from_readline(self.editor.readline(prompt))?;
        if let Input::Line(line) = &input {
            if !line.is_empty() {
                let _ = self.editor.add_history_entry(line.as_str());
            }
        }
        Ok(input)
    }

    /// Save history to disk
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(ref path) = self.history_path {
            self.editor.save_history(path)?;
        }
        Ok(())
    }

    pub fn history_len(&self) -> usize {
        self.editor.history().len()
    }
}

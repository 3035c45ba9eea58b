//! Interactive questionnaire
//!
//! Asks each unanswered field in order, re-asking until the value is
//! accepted. Once the last field is answered the form is submitted. A failed
//! submission keeps every answer so it can be retried with `/submit`.

pub mod commands;
pub mod display;
pub mod input;

use anyhow::Result;
use colored::Colorize;

use crate::errors::{SubmitError, ValidationError};
use crate::form::{FieldSpec, FormState, FIELDS};
use crate::repl::commands::{is_command, Command};
pub use crate::repl::display::DisplayManager;
use crate::repl::input::{Input, InputHandler};
use crate::session::FormSession;

/// Field the questionnaire asks next
pub fn next_field(form: &FormState) -> Option<&'static FieldSpec> {
    form.entries()
        .find(|(_, raw)| raw.is_empty())
        .map(|(spec, _)| spec)
}

/// Store an answer for a field if it is acceptable
pub fn answer(form: &mut FormState, spec: &'static FieldSpec, raw: &str) -> Result<(), ValidationError> {
    form.check_field(spec, raw)?;
    form.set(spec.name, raw);
    Ok(())
}

/// Clear the answer before the current question; returns the field cleared
pub fn step_back(form: &mut FormState) -> Option<&'static FieldSpec> {
    let current = next_field(form)
        .and_then(|spec| FIELDS.iter().position(|f| f.name == spec.name))
        .unwrap_or(FIELDS.len());
    let previous = FIELDS[..current]
        .iter()
        .rev()
        .find(|spec| !form.get(spec.name).unwrap_or_default().is_empty())?;
    form.set(previous.name, "");
    Some(previous)
}

/// Questionnaire session coordinator
pub struct ReplSession {
    input_handler: InputHandler,
    display_manager: DisplayManager,
    session: FormSession,
}

impl ReplSession {
    pub fn new(session: FormSession) -> Result<Self> {
        let input_handler = match InputHandler::default_history_path() {
            Some(path) => InputHandler::with_history(path)?,
            None => InputHandler::new()?,
        };

        Ok(ReplSession {
            input_handler,
            display_manager: DisplayManager::new(),
            session,
        })
    }

    pub fn with_display(mut self, display_manager: DisplayManager) -> Self {
        self.display_manager = display_manager;
        self
    }

    pub fn show_welcome(&self, version: &str) {
        self.display_manager
            .show_banner(version, &self.session.predictor().describe());
    }

    /// Run until the user exits or input ends
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let line = match next_field(self.session.form()) {
                Some(spec) => {
                    let question = spec.prompt_line(self.session.form().academic_options());
                    println!("{}", question.bold());
                    self.input_handler.read_with_prompt("> ")
                }
                None => self.input_handler.read_line(),
            };

            let line = match line? {
                Input::Line(line) => line,
                Input::Interrupted => {
                    println!("\nUse {} to quit", "/exit".green());
                    continue;
                }
                Input::Eof => break,
            };

            if line.is_empty() {
                continue;
            }

            if is_command(&line) {
                if !self.handle_command(commands::parse(&line)).await? {
                    break;
                }
                continue;
            }

            match next_field(self.session.form()) {
                Some(spec) => match answer(self.session.form_mut(), spec, &line) {
                    Ok(()) => {
                        if next_field(self.session.form()).is_none() {
                            self.submit().await;
                        }
                    }
                    Err(e) => self.display_manager.show_error(&e.message()),
                },
                None => self.display_manager.show_info(
                    "All questions are answered. Type /submit, /edit FIELD or /reset.",
                ),
            }
        }

        println!("{}", "Take care!".green());
        self.save()
    }

    /// Returns false when the session should end
    async fn handle_command(&mut self, command: Command) -> Result<bool> {
        if command.clears_screen() {
            self.display_manager.clear_screen()?;
        }
        match command {
            Command::Help => self.display_manager.show_help(),
            Command::Show => self.display_manager.show_answers(self.session.form()),
            Command::Back => match step_back(self.session.form_mut()) {
                Some(spec) => self
                    .display_manager
                    .show_info(&format!("Answer again: {}", spec.label)),
                None => self.display_manager.show_info("Nothing to go back to."),
            },
            Command::Edit { field } => {
                self.session.form_mut().set(field.name, "");
            }
            Command::Submit => self.submit().await,
            Command::Reset => {
                self.session.reset();
                self.display_manager.show_info("Starting a new assessment.");
            }
            Command::Clear => {}
            Command::Exit => return Ok(false),
            Command::Unknown { input } => {
                self.display_manager
                    .show_error(&format!("Unknown command: {}", input));
                println!("Type {} for available commands", "/help".cyan());
            }
        }
        Ok(true)
    }

    async fn submit(&mut self) {
        let target = self.session.predictor().describe();
        self.display_manager.start_submission(&target);
        let result = self.session.submit().await;
        self.display_manager.finish_current();

        match result {
            Ok(_) => {
                if let Some(view) = self.session.result_view() {
                    self.display_manager.show_result(&view);
                }
            }
            Err(SubmitError::Validation(e)) => self.display_manager.show_error(&e.message()),
            Err(SubmitError::Submission(e)) => {
                self.display_manager.show_error(&e.user_message());
                self.display_manager
                    .show_info("Your answers were kept. Type /submit to try again.");
            }
        }
    }

    /// Save history
    pub fn save(&mut self) -> Result<()> {
        self.input_handler.save_history()
    }
}

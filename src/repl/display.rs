//! Display manager for the questionnaire terminal UI
//!
//! Manages the submission spinner and formatted output.

use colored::*;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

use crate::form::FormState;
use crate::repl::commands::help_entries;
use crate::view::{ResultView, IMPORTANT_NOTE};

/// Display manager for the questionnaire
pub struct DisplayManager {
    current_bar: Option<ProgressBar>,
    update_interval: Duration,
    show_progress: bool,
}

impl DisplayManager {
    pub fn new() -> Self {
        DisplayManager {
            current_bar: None,
            update_interval: Duration::from_millis(100),
            show_progress: true,
        }
    }

    /// Disable the spinner (quiet mode)
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, source: &str) {
        let width = 64;
        let rule = "=".repeat(width);
        let title = format!("  mindcheck {} - Student Wellbeing Check", version);
        let info = format!("  Assessment: {}", source);

        println!("\n{}", rule.cyan());
        println!("{}", title.bold().cyan());
        println!("{}", info.dimmed());
        println!("{}\n", rule.cyan());
        println!(
            "Answer each question (type {} for commands, {} to quit)",
            "/help".green(),
            "/exit".green()
        );
        println!(
            "{}\n",
            "This is a self-check, not a clinical diagnosis.".dimmed()
        );
    }

    /// Start the spinner shown while a submission is outstanding
    pub fn start_submission(&mut self, target: &str) {
        self.finish_current();
        if !self.show_progress {
            return;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Analyzing your answers ({})...", target));
        pb.enable_steady_tick(self.update_interval);
        self.current_bar = Some(pb);
    }

    pub fn finish_current(&mut self) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
    }

    pub fn is_busy(&self) -> bool {
        self.current_bar.is_some()
    }

    /// Display the assessment result
    pub fn show_result(&self, view: &ResultView) {
        let label = match view.severity {
            0 => view.label.green().bold(),
            1..=3 => view.label.cyan().bold(),
            4..=6 => view.label.yellow().bold(),
            _ => view.label.red().bold(),
        };

        println!();
        println!("{}", "Assessment Result".bold().cyan());
        println!("{}", "-".repeat(60).cyan());
        println!("Condition: {}", label);
        println!(
            "Severity:  {}/10 {}",
            view.severity,
            format!("({})", view.band).dimmed()
        );
        println!("\n{}\n", view.summary);
        println!("{}", "Recommendations:".bold());
        for item in &view.items {
            println!("  {} {}", "-".cyan(), item);
        }
        println!("\n{}", "Contributing Factors:".bold());
        for (area, comment) in &view.factors {
            println!("  {:<18} {}", format!("{}:", area).cyan(), comment);
        }
        println!("\n{} {}", "Important Note:".yellow().bold(), IMPORTANT_NOTE.dimmed());
        println!(
            "\n{} for a new assessment, {} to change an answer, {} to quit\n",
            "/reset".green(),
            "/edit FIELD".green(),
            "/exit".green()
        );
    }

    /// Print the answers given so far
    pub fn show_answers(&self, form: &FormState) {
        println!("\n{}", "Your answers".bold().cyan());
        println!("{}", "-".repeat(60).cyan());
        for (spec, raw) in form.entries() {
            let value = if raw.is_empty() {
                "(not answered)".dimmed().to_string()
            } else {
                raw.to_string()
            };
            println!("  {:<24} {}", spec.label, value);
        }
        println!();
    }

    pub fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());
        for (name, description) in help_entries() {
            println!("  {:<20} {}", name.green(), description);
        }
        println!();
    }

    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

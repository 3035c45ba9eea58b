//! Command-line argument parsing for mindcheck
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, Mode};
use crate::form::field;

/// mindcheck - student wellbeing questionnaire
#[derive(Parser, Debug)]
#[command(name = "mindcheck")]
#[command(version)]
#[command(about = "Fill in the wellbeing questionnaire and get an assessment", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Primary API base URL (overrides config and MINDCHECK_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Where assessments come from
    #[arg(long, value_enum, global = true)]
    pub mode: Option<Mode>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress everything except results and errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Answer the questionnaire interactively (default)
    Start,

    /// Submit answers without prompting
    Submit {
        /// TOML or JSON file with the ten fields
        #[arg(long, value_name = "FILE")]
        answers: Option<PathBuf>,

        /// Set a single field; overrides the answers file
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,

        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch the academic performance options from the service
    Options,

    /// Run the scoring service
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// Check configuration and endpoints
    Doctor,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Check argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.quiet && self.verbose > 0 {
            return Err("Cannot combine --quiet with --verbose.".to_string());
        }
        if let Some(Commands::Submit { set, .. }) = &self.command {
            parse_assignments(set)?;
        }
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(mode) = self.mode {
            config.assessment.mode = mode;
        }
    }
}

/// Split `FIELD=VALUE` pairs, rejecting unknown field names
pub fn parse_assignments(pairs: &[String]) -> Result<Vec<(String, String)>, String> {
    pairs
        .iter()
        .map(|pair| {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("Expected FIELD=VALUE, got '{}'", pair))?;
            let name = name.trim();
            if field(name).is_none() {
                return Err(format!("Unknown field '{}'", name));
            }
            Ok((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

impl Verbosity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Default tracing filter when RUST_LOG is not set
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "mindcheck=error",
            Verbosity::Normal => "mindcheck=warn",
            Verbosity::Verbose => "mindcheck=info",
            Verbosity::VeryVerbose => "mindcheck=debug",
        }
    }

    /// Check if should show spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show telemetry details
    pub fn show_events(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }
}

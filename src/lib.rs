//! mindcheck - Student Wellbeing Questionnaire
//!
//! A terminal questionnaire that collects ten answers about daily life,
//! validates them locally and asks a scoring service for a condition label
//! and recommendations. The same crate ships the scoring service.
//!
//! # Architecture
//!
//! - **Form**: field table, raw form state, validation
//! - **Submission**: wire format, HTTP client with endpoint fallback, predictors
//! - **Interface**: CLI, interactive questionnaire, result view, doctor

// Core
pub mod errors;
pub mod form;
pub mod scoring;
pub mod assessment;

// Re-export commonly used types
pub use errors::{AppError, Result, SubmissionError, SubmitError, ValidationError};

// Submission
pub mod wire;
pub mod client;
pub mod predictor;
pub mod session;
pub mod telemetry;

// Interface
pub mod cli;
pub mod config;
pub mod doctor;
pub mod repl;
pub mod view;

// Scoring service
pub mod server;

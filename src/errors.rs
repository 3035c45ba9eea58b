//! Error types for mindcheck
//!
//! Validation errors are local and never reach the network. Submission
//! errors are classified for display only; every failure is terminal for the
//! current attempt.

use thiserror::Error;

/// Why a single form field was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationKind {
    /// Field left empty
    Missing,
    /// Numeric field that does not parse as a whole number
    NotANumber,
    /// Numeric field outside its declared bounds
    OutOfRange { min: u8, max: u8 },
    /// Choice field with a value that matches none of its options
    UnknownOption { options: Vec<String> },
}

/// Local validation failure for one field of the answer set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", self.message())]
pub struct ValidationError {
    pub field: &'static str,
    pub label: &'static str,
    pub kind: ValidationKind,
}

impl ValidationError {
    pub fn new(field: &'static str, label: &'static str, kind: ValidationKind) -> Self {
        Self { field, label, kind }
    }

    /// User-facing message for the failure
    pub fn message(&self) -> String {
        match &self.kind {
            ValidationKind::Missing => format!(
                "Please fill in all fields before submitting. Missing: {}",
                self.label
            ),
            ValidationKind::NotANumber => {
                format!("{} must be a whole number", self.label)
            }
            ValidationKind::OutOfRange { min, max } => {
                format!("{} must be between {} and {}", self.label, min, max)
            }
            ValidationKind::UnknownOption { options } => {
                format!("{} must be one of: {}", self.label, options.join(", "))
            }
        }
    }
}

/// Failure of the prediction step, classified for display
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Connectivity absent (DNS, refused, reset)
    #[error("assessment service unreachable")]
    Offline,

    #[error("assessment service timed out")]
    Timeout,

    /// HTTP 400
    #[error("assessment service rejected the answers: {0}")]
    BadRequest(String),

    /// HTTP 5xx
    #[error("assessment service failed with status {status}")]
    ServerFault { status: u16 },

    #[error("assessment failed: {0}")]
    Generic(String),
}

impl SubmissionError {
    /// Message shown to the person filling in the form
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Offline => {
                "Unable to connect to the assessment service. Please check your internet connection and try again.".to_string()
            }
            SubmissionError::Timeout => {
                "The assessment service took too long to respond. Please try again.".to_string()
            }
            SubmissionError::BadRequest(detail) => format!(
                "The service could not process your answers ({}). Please check your inputs and try again.",
                detail
            ),
            SubmissionError::ServerFault { status } => format!(
                "The assessment service encountered an error (HTTP {}). Please try again later.",
                status
            ),
            SubmissionError::Generic(detail) => format!(
                "Something went wrong while getting your assessment: {}",
                detail
            ),
        }
    }

    /// Whether another endpoint could plausibly succeed with the same payload
    pub fn allows_fallback(&self) -> bool {
        matches!(
            self,
            SubmissionError::Offline
                | SubmissionError::Timeout
                | SubmissionError::ServerFault { .. }
        )
    }

    /// Short classification tag used in logs and telemetry
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionError::Offline => "offline",
            SubmissionError::Timeout => "timeout",
            SubmissionError::BadRequest(_) => "bad_request",
            SubmissionError::ServerFault { .. } => "server_fault",
            SubmissionError::Generic(_) => "generic",
        }
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SubmissionError::Timeout
        } else if err.is_connect() {
            SubmissionError::Offline
        } else if let Some(status) = err.status() {
            SubmissionError::from_status(status.as_u16(), err.to_string())
        } else if err.is_decode() {
            SubmissionError::Generic(format!("unreadable response: {}", err))
        } else {
            SubmissionError::Generic(err.to_string())
        }
    }
}

impl SubmissionError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, detail: String) -> Self {
        match status {
            400 => SubmissionError::BadRequest(detail),
            500..=599 => SubmissionError::ServerFault { status },
            _ => SubmissionError::Generic(format!("unexpected status {}: {}", status, detail)),
        }
    }
}

/// Outcome of a rejected submit: either local validation or the prediction step
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation(e) => e.message(),
            SubmitError::Submission(e) => e.user_message(),
        }
    }
}

/// Application-level errors (configuration, files, serving)
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Answers file error: {0}")]
    AnswersFile(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Result type alias for application operations
pub type Result<T> = std::result::Result<T, AppError>;

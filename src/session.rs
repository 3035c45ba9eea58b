//! Submission flow
//!
//! Filled in, submitted, displayed, optionally reset. Validation runs before
//! the predictor is touched; a failed prediction leaves the form as it was.
//! `submit` borrows the session mutably, so a second submission cannot start
//! while one is outstanding.

use std::time::Instant;

use crate::assessment::Assessment;
use crate::errors::SubmitError;
use crate::form::{Answers, FormState};
use crate::predictor::Predictor;
use crate::telemetry::{TelemetryCollector, TelemetryEvent};
use crate::view::ResultView;

/// Where the session currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Editing,
    Showing(Assessment),
    Failed(String),
}

/// One questionnaire session bound to a predictor
pub struct FormSession {
    form: FormState,
    state: SessionState,
    /// Answers behind the assessment being shown
    submitted: Option<Answers>,
    predictor: Box<dyn Predictor>,
    telemetry: TelemetryCollector,
}

impl FormSession {
    pub fn new(predictor: Box<dyn Predictor>) -> Self {
        Self {
            form: FormState::new(),
            state: SessionState::Editing,
            submitted: None,
            predictor,
            telemetry: TelemetryCollector::new(),
        }
    }

    pub fn with_telemetry(mut self, telemetry: TelemetryCollector) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn result(&self) -> Option<&Assessment> {
        match &self.state {
            SessionState::Showing(assessment) => Some(assessment),
            _ => None,
        }
    }

    /// Answers behind the assessment being shown
    pub fn submitted_answers(&self) -> Option<&Answers> {
        match self.state {
            SessionState::Showing(_) => self.submitted.as_ref(),
            _ => None,
        }
    }

    /// Result screen for the assessment being shown
    pub fn result_view(&self) -> Option<ResultView> {
        match (&self.state, &self.submitted) {
            (SessionState::Showing(assessment), Some(answers)) => {
                Some(ResultView::new(assessment, answers))
            }
            _ => None,
        }
    }

    pub fn predictor(&self) -> &dyn Predictor {
        self.predictor.as_ref()
    }

    /// Validate the form and run the predictor
    pub async fn submit(&mut self) -> Result<Assessment, SubmitError> {
        let answers = match self.form.validate() {
            Ok(answers) => answers,
            Err(err) => {
                tracing::info!(field = err.field, "submission rejected by validation");
                self.telemetry.record(TelemetryEvent::ValidationRejected {
                    field: err.field,
                    timestamp: Instant::now(),
                });
                self.state = SessionState::Failed(err.message());
                return Err(err.into());
            }
        };

        match self.predictor.predict(&answers).await {
            Ok(assessment) => {
                tracing::info!(
                    id = %assessment.id,
                    condition = %assessment.condition,
                    "assessment received"
                );
                self.state = SessionState::Showing(assessment.clone());
                self.submitted = Some(answers);
                Ok(assessment)
            }
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "assessment failed");
                self.state = SessionState::Failed(err.user_message());
                Err(err.into())
            }
        }
    }

    /// Back to an empty form with no result
    pub fn reset(&mut self) {
        self.form.reset();
        self.state = SessionState::Editing;
        self.submitted = None;
    }
}

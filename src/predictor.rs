//! Prediction backends
//!
//! `RemotePredictor` goes over HTTP, `LocalPredictor` runs the rule-based
//! scorer in process and `MockPredictor` returns a fixed result.

use async_trait::async_trait;

use crate::assessment::{Assessment, AssessmentSource};
use crate::client::PredictionClient;
use crate::config::{Config, Mode};
use crate::errors::{AppError, SubmissionError};
use crate::form::Answers;
use crate::scoring::classify;
use crate::telemetry::TelemetryCollector;
use crate::wire::split_recommendation;

/// Fixed recommendations returned by the mock predictor
pub const MOCK_RECOMMENDATIONS: [&str; 4] = [
    "Continue maintaining your healthy lifestyle.",
    "Regular exercise and adequate sleep are important for mental wellbeing.",
    "Stay connected with friends and family for social support.",
    "Engage in activities you enjoy to maintain a positive mood.",
];

/// Maps a validated answer set to an assessment
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, answers: &Answers) -> Result<Assessment, SubmissionError>;

    /// Short description for banners and logs
    fn describe(&self) -> String;
}

pub struct RemotePredictor {
    client: PredictionClient,
}

impl RemotePredictor {
    pub fn new(client: PredictionClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &PredictionClient {
        &self.client
    }
}

#[async_trait]
impl Predictor for RemotePredictor {
    async fn predict(&self, answers: &Answers) -> Result<Assessment, SubmissionError> {
        self.client.predict(answers).await
    }

    fn describe(&self) -> String {
        format!("remote ({})", self.client.primary_url())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalPredictor;

#[async_trait]
impl Predictor for LocalPredictor {
    async fn predict(&self, answers: &Answers) -> Result<Assessment, SubmissionError> {
        let condition = classify(answers);
        Ok(Assessment::new(
            condition.label(),
            split_recommendation(condition.recommendation()),
            AssessmentSource::Local,
        ))
    }

    fn describe(&self) -> String {
        "local rules".to_string()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MockPredictor;

#[async_trait]
impl Predictor for MockPredictor {
    async fn predict(&self, _answers: &Answers) -> Result<Assessment, SubmissionError> {
        Ok(Assessment::new(
            "Normal",
            MOCK_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
            AssessmentSource::Mock,
        ))
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

/// Build the predictor selected by the configuration
pub fn from_config(
    config: &Config,
    telemetry: TelemetryCollector,
) -> Result<Box<dyn Predictor>, AppError> {
    Ok(match config.assessment.mode {
        Mode::Remote => Box::new(RemotePredictor::new(
            PredictionClient::from_config(config)?.with_telemetry(telemetry),
        )),
        Mode::Local => Box::new(LocalPredictor),
        Mode::Mock => Box::new(MockPredictor),
    })
}

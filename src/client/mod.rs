//! HTTP client for the prediction service
//!
//! One request is outstanding at a time. A failed attempt moves on to the
//! next endpoint of the plan: primary, backups in order, then the primary
//! over plain http when the downgrade is enabled. Only connectivity, timeout
//! and 5xx failures move on; anything else ends the chain.

use crate::assessment::{Assessment, AssessmentSource};
use crate::config::{ApiConfig, Config};
use crate::errors::{AppError, SubmissionError};
use crate::form::Answers;
use crate::telemetry::{TelemetryCollector, TelemetryEvent};
use crate::wire::{encode_request, Encoding, PredictResponse};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::time::{Duration, Instant};

/// Timeout for reachability probes
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default user agent when the configuration does not set one
pub const DEFAULT_USER_AGENT: &str = concat!("mindcheck/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the prediction endpoint
pub struct PredictionClient {
    client: Client,
    endpoints: Vec<String>,
    downgrade: bool,
    encoding: Encoding,
    telemetry: TelemetryCollector,
}

impl PredictionClient {
    /// Build a client from the API section and the downgrade decision
    pub fn new(api: &ApiConfig, downgrade: bool) -> Result<Self, AppError> {
        let user_agent = api
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .user_agent(user_agent)
            .build()?;

        let mut endpoints: Vec<String> = Vec::new();
        for url in std::iter::once(&api.base_url).chain(api.backup_urls.iter()) {
            let url = normalize_base(url);
            if !endpoints.contains(&url) {
                endpoints.push(url);
            }
        }

        Ok(Self {
            client,
            endpoints,
            downgrade,
            encoding: api.encoding,
            telemetry: TelemetryCollector::new(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(&config.api, config.downgrade_enabled())
    }

    /// Share a telemetry collector with the caller
    pub fn with_telemetry(mut self, telemetry: TelemetryCollector) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn primary_url(&self) -> &str {
        self.endpoints.first().map(String::as_str).unwrap_or_default()
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Base URLs a prediction will try, in order
    pub fn attempt_plan(&self) -> Vec<String> {
        let mut plan = self.endpoints.clone();
        if self.downgrade {
            if let Some(insecure) = self
                .endpoints
                .first()
                .and_then(|primary| primary.strip_prefix("https://"))
                .map(|rest| format!("http://{}", rest))
            {
                if !plan.contains(&insecure) {
                    plan.push(insecure);
                }
            }
        }
        plan
    }

    /// Submit an answer set through the fallback chain
    pub async fn predict(&self, answers: &Answers) -> Result<Assessment, SubmissionError> {
        let body = encode_request(answers, self.encoding);
        let plan = self.attempt_plan();

        self.run_chain(&plan, |base| {
            let body = body.clone();
            async move { self.predict_at(&base, &body).await }
        })
        .await
    }

    async fn predict_at(&self, base: &str, body: &serde_json::Value) -> Result<Assessment, SubmissionError> {
        let url = format!("{}/api/predict", base);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or_else(|_| status.to_string());
            return Err(SubmissionError::from_status(status.as_u16(), detail));
        }

        let parsed: PredictResponse = response.json().await?;
        let (condition, recommendations) = parsed.into_parts()?;

        Ok(Assessment::new(
            condition,
            recommendations,
            AssessmentSource::Remote(base.to_string()),
        ))
    }

    /// Fetch the academic performance options offered by the service
    pub async fn academic_options(&self) -> Result<Vec<String>, SubmissionError> {
        let endpoints = self.endpoints.clone();

        self.run_chain(&endpoints, |base| async move { self.academic_options_at(&base).await })
            .await
    }

    async fn academic_options_at(&self, base: &str) -> Result<Vec<String>, SubmissionError> {
        let url = format!("{}/api/academic-options", base);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::from_status(status.as_u16(), status.to_string()));
        }
        Ok(response.json::<Vec<String>>().await?)
    }

    /// Check whether a base URL answers on its index route
    pub async fn probe(&self, base: &str) -> Result<(), SubmissionError> {
        let url = format!("{}/", normalize_base(base));
        let response = self.client.get(&url).timeout(PROBE_TIMEOUT).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SubmissionError::from_status(status.as_u16(), status.to_string()))
        }
    }

    async fn run_chain<T, F, Fut>(&self, plan: &[String], mut attempt: F) -> Result<T, SubmissionError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T, SubmissionError>>,
    {
        let mut last_error = SubmissionError::Generic("no endpoint configured".to_string());

        for (idx, base) in plan.iter().enumerate() {
            if idx > 0 {
                tracing::warn!(from = %plan[idx - 1], to = %base, "falling back to next endpoint");
                self.telemetry.record(TelemetryEvent::Fallback {
                    from: plan[idx - 1].clone(),
                    to: base.clone(),
                    timestamp: Instant::now(),
                });
            }

            self.telemetry.record(TelemetryEvent::AttemptStarted {
                url: base.clone(),
                timestamp: Instant::now(),
            });
            let started = Instant::now();

            match attempt(base.clone()).await {
                Ok(value) => {
                    let duration_ms = started.elapsed().as_millis() as u64;
                    tracing::debug!(url = %base, duration_ms, "request succeeded");
                    self.telemetry.record(TelemetryEvent::AttemptSucceeded {
                        url: base.clone(),
                        duration_ms,
                        timestamp: Instant::now(),
                    });
                    return Ok(value);
                }
                Err(err) => {
                    let duration_ms = started.elapsed().as_millis() as u64;
                    tracing::warn!(url = %base, kind = err.kind(), error = %err, "request failed");
                    self.telemetry.record(TelemetryEvent::AttemptFailed {
                        url: base.clone(),
                        kind: err.kind(),
                        duration_ms,
                        timestamp: Instant::now(),
                    });

                    let terminal = !err.allows_fallback();
                    last_error = err;
                    if terminal {
                        break;
                    }
                }
            }
        }

        Err(last_error)
    }
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

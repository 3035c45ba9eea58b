//! Wire format for the prediction endpoint
//!
//! Requests are flat JSON records of the ten fields. Choice fields are
//! written either as labels or as integer codes. Responses carry either a
//! recommendation list or a single paragraph that is split into points.

use crate::errors::SubmissionError;
use crate::form::answers::yes_no_label;
use crate::form::Answers;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Used when a response carries no recommendation at all
pub const DEFAULT_RECOMMENDATION: &str = "Continue maintaining your healthy lifestyle.";

/// How choice fields are written in the request body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// "Poor"/"Average"/"Good" and "Yes"/"No"
    #[default]
    Labels,
    /// Poor=0, Average=1, Good=2 and 1/0
    Codes,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Labels => "labels",
            Encoding::Codes => "codes",
        }
    }
}

/// Build the request body for an answer set
pub fn encode_request(answers: &Answers, encoding: Encoding) -> Value {
    let flag = |value: bool| match encoding {
        Encoding::Labels => json!(yes_no_label(value)),
        Encoding::Codes => json!(value as u8),
    };
    let academic = match encoding {
        Encoding::Labels => json!(answers.academic_performance.label()),
        Encoding::Codes => json!(answers.academic_performance.code()),
    };

    json!({
        "sleep_hours": answers.sleep_hours,
        "academic_performance": academic,
        "bullied": flag(answers.bullied),
        "has_close_friends": flag(answers.has_close_friends),
        "homesick_level": answers.homesick_level,
        "mess_food_rating": answers.mess_food_rating,
        "sports_participation": flag(answers.sports_participation),
        "social_activities": answers.social_activities,
        "study_hours": answers.study_hours,
        "screen_time": answers.screen_time
    })
}

/// Body of a prediction response; both historical shapes are accepted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictResponse {
    /// Resolve into a label and recommendation list
    pub fn into_parts(self) -> Result<(String, Vec<String>), SubmissionError> {
        if let Some(error) = self.error {
            return Err(SubmissionError::Generic(error));
        }

        let condition = self
            .condition
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| SubmissionError::Generic("response has no condition".to_string()))?;

        let recommendations = match (self.recommendations, self.recommendation) {
            (Some(list), _) => list,
            (None, Some(text)) if !text.trim().is_empty() => split_recommendation(&text),
            _ => vec![DEFAULT_RECOMMENDATION.to_string()],
        };

        Ok((condition, recommendations))
    }
}

/// Split a recommendation paragraph into sentence points
pub fn split_recommendation(text: &str) -> Vec<String> {
    text.split(". ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.ends_with('.') {
                s.to_string()
            } else {
                format!("{}.", s)
            }
        })
        .collect()
}

//! Result of a submission

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which predictor produced an assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "lowercase")]
pub enum AssessmentSource {
    Remote(String),
    Local,
    Mock,
}

/// Condition label plus recommendations for one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: Uuid,
    pub condition: String,
    pub recommendations: Vec<String>,
    pub assessed_at: DateTime<Utc>,
    pub source: AssessmentSource,
}

impl Assessment {
    pub fn new(condition: impl Into<String>, recommendations: Vec<String>, source: AssessmentSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            condition: condition.into(),
            recommendations,
            assessed_at: Utc::now(),
            source,
        }
    }

    pub fn is_normal(&self) -> bool {
        self.condition == "Normal"
    }
}

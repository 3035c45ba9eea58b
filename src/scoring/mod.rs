//! Condition catalogue and rule-based classifier
//!
//! The classifier is the in-process scorer used by `local` mode and by the
//! scoring service. Rules are ordered; the first match wins.

use crate::form::{AcademicPerformance, Answers};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity used for labels outside the catalogue
pub const UNKNOWN_SEVERITY: u8 = 5;

/// Condition labels the scorer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Depression,
    Anxiety,
    Stress,
    #[serde(rename = "ADHD")]
    Adhd,
    #[serde(rename = "PTSD")]
    Ptsd,
    #[serde(rename = "OCD")]
    Ocd,
    #[serde(rename = "Bipolar Disorder")]
    BipolarDisorder,
    #[serde(rename = "Eating Disorder")]
    EatingDisorder,
    #[serde(rename = "Adjustment Disorder")]
    AdjustmentDisorder,
    Normal,
}

impl Condition {
    pub const ALL: [Condition; 10] = [
        Condition::Depression,
        Condition::Anxiety,
        Condition::Stress,
        Condition::Adhd,
        Condition::Ptsd,
        Condition::Ocd,
        Condition::BipolarDisorder,
        Condition::EatingDisorder,
        Condition::AdjustmentDisorder,
        Condition::Normal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Condition::Depression => "Depression",
            Condition::Anxiety => "Anxiety",
            Condition::Stress => "Stress",
            Condition::Adhd => "ADHD",
            Condition::Ptsd => "PTSD",
            Condition::Ocd => "OCD",
            Condition::BipolarDisorder => "Bipolar Disorder",
            Condition::EatingDisorder => "Eating Disorder",
            Condition::AdjustmentDisorder => "Adjustment Disorder",
            Condition::Normal => "Normal",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Severity on a 1-10 scale
    pub fn severity(&self) -> u8 {
        match self {
            Condition::Depression => 8,
            Condition::Anxiety => 7,
            Condition::Stress => 6,
            Condition::Adhd => 6,
            Condition::Ptsd => 8,
            Condition::Ocd => 7,
            Condition::BipolarDisorder => 8,
            Condition::EatingDisorder => 7,
            Condition::AdjustmentDisorder => 5,
            Condition::Normal => 1,
        }
    }

    /// Recommendation paragraph returned with the label
    pub fn recommendation(&self) -> &'static str {
        match self {
            Condition::Depression => "Engage in regular exercise, maintain social connections, and seek support from friends/family. If symptoms persist, consult a mental health professional.",
            Condition::Anxiety => "Practice relaxation techniques (deep breathing, meditation). Maintain a routine, avoid excessive caffeine, and talk to someone you trust. Seek professional help if anxiety interferes with daily life.",
            Condition::Stress => "Try mindfulness, yoga, or physical activity. Break tasks into manageable steps and take regular breaks. Reach out to support groups or counselors if needed.",
            Condition::Adhd => "Establish routines, use reminders, and break tasks into smaller steps. Consider professional evaluation for therapy or medication if attention issues are persistent.",
            Condition::Ptsd => "Seek trauma-informed counseling. Practice grounding techniques and connect with support groups. Professional therapy (CBT, EMDR) is highly recommended.",
            Condition::Ocd => "Cognitive-behavioral therapy (CBT) is effective. Practice exposure and response prevention with professional guidance. Medication may help in some cases.",
            Condition::BipolarDisorder => "Consult a psychiatrist for mood stabilizers and therapy. Maintain regular sleep and activity patterns. Avoid substance misuse and seek ongoing support.",
            Condition::EatingDisorder => "Seek help from a nutritionist and mental health professional. Join support groups and involve family in recovery. Early intervention is key.",
            Condition::AdjustmentDisorder => "Talk to a counselor about recent changes. Practice stress management and self-care. Most cases resolve with time and support.",
            Condition::Normal => "Continue healthy habits: regular sleep, balanced diet, exercise, and social engagement. Monitor your well-being and seek help if you notice changes.",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity for any label, including ones a remote service invents
pub fn severity_for_label(label: &str) -> u8 {
    Condition::from_label(label)
        .map(|c| c.severity())
        .unwrap_or(UNKNOWN_SEVERITY)
}

/// Human-readable band for a severity score
pub fn severity_band(severity: u8) -> &'static str {
    if severity <= 3 {
        "Mild - Minimal impact on daily functioning"
    } else if severity <= 6 {
        "Moderate - Some impact on daily functioning"
    } else {
        "Significant - Consider professional consultation"
    }
}

/// Map an answer set to a condition
pub fn classify(a: &Answers) -> Condition {
    let poor = a.academic_performance == AcademicPerformance::Poor;
    let average = a.academic_performance == AcademicPerformance::Average;
    let good = a.academic_performance == AcademicPerformance::Good;

    let sleep = a.sleep_hours;
    let screen = a.screen_time;
    let social = a.social_activities;
    let study = a.study_hours;
    let homesick = a.homesick_level;
    let food = a.mess_food_rating;

    if (sleep <= 5 && screen >= 7) || (a.bullied && !a.has_close_friends) || (poor && social <= 2) {
        Condition::Depression
    } else if (homesick >= 4 && a.bullied) || (poor && sleep <= 6) || (screen >= 8 && social <= 2) {
        Condition::Anxiety
    } else if study >= 7 || (sleep <= 5 && poor) || (homesick >= 4 && study >= 6) {
        Condition::Stress
    } else if (study <= 2 && screen >= 8 && poor) || (social >= 4 && poor) {
        Condition::Adhd
    } else if a.bullied && sleep <= 5 && homesick >= 4 {
        Condition::Ptsd
    } else if (study >= 7 && social <= 1) || (good && food <= 2 && study >= 6) {
        Condition::Ocd
    } else if (sleep <= 4 || sleep >= 9) && (social >= 4 || a.sports_participation) && screen >= 8 {
        Condition::BipolarDisorder
    } else if food <= 2 && sleep <= 5 && homesick >= 4 {
        Condition::EatingDisorder
    } else if homesick >= 4 && average && (5..=7).contains(&sleep) {
        Condition::AdjustmentDisorder
    } else {
        Condition::Normal
    }
}

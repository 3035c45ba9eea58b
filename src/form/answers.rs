//! Typed answer set produced by validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Self-reported academic performance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcademicPerformance {
    Poor,
    Average,
    Good,
}

impl AcademicPerformance {
    pub const ALL: [AcademicPerformance; 3] = [
        AcademicPerformance::Poor,
        AcademicPerformance::Average,
        AcademicPerformance::Good,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AcademicPerformance::Poor => "Poor",
            AcademicPerformance::Average => "Average",
            AcademicPerformance::Good => "Good",
        }
    }

    /// Integer code used by the `codes` wire encoding
    pub fn code(&self) -> u8 {
        match self {
            AcademicPerformance::Poor => 0,
            AcademicPerformance::Average => 1,
            AcademicPerformance::Good => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(AcademicPerformance::Poor),
            1 => Some(AcademicPerformance::Average),
            2 => Some(AcademicPerformance::Good),
            _ => None,
        }
    }

    pub fn default_options() -> Vec<String> {
        Self::ALL.iter().map(|a| a.label().to_string()).collect()
    }
}

impl FromStr for AcademicPerformance {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poor" => Ok(AcademicPerformance::Poor),
            "average" => Ok(AcademicPerformance::Average),
            "good" => Ok(AcademicPerformance::Good),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AcademicPerformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse a yes/no answer (`yes`, `y`, `no`, `n`, any case)
pub fn parse_yes_no(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

pub fn yes_no_label(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// A fully validated answer set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    pub sleep_hours: u8,
    pub academic_performance: AcademicPerformance,
    pub bullied: bool,
    pub has_close_friends: bool,
    pub homesick_level: u8,
    pub mess_food_rating: u8,
    pub sports_participation: bool,
    pub social_activities: u8,
    pub study_hours: u8,
    pub screen_time: u8,
}

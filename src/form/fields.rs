//! Questionnaire field table
//!
//! The order of `FIELDS` is the canonical order used for prompting,
//! validation and the wire payload.

/// What a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Whole number within inclusive bounds
    Integer { min: u8, max: u8 },
    /// Poor / Average / Good
    Academic,
    /// Yes / No
    YesNo,
}

/// Static description of one questionnaire field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub prompt: &'static str,
    /// Scale hint shown next to the prompt
    pub hint: Option<&'static str>,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn bounds(&self) -> Option<(u8, u8)> {
        match self.kind {
            FieldKind::Integer { min, max } => Some((min, max)),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, FieldKind::Integer { .. })
    }

    /// Prompt text including the accepted range or options
    pub fn prompt_line(&self, academic_options: &[String]) -> String {
        let accepted = match self.kind {
            FieldKind::Integer { min, max } => format!("{}-{}", min, max),
            FieldKind::Academic => academic_options.join("/"),
            FieldKind::YesNo => "Yes/No".to_string(),
        };
        match self.hint {
            Some(hint) => format!("{} {} ({})", self.prompt, hint, accepted),
            None => format!("{} ({})", self.prompt, accepted),
        }
    }
}

pub const SLEEP_HOURS: &str = "sleep_hours";
pub const ACADEMIC_PERFORMANCE: &str = "academic_performance";
pub const BULLIED: &str = "bullied";
pub const HAS_CLOSE_FRIENDS: &str = "has_close_friends";
pub const HOMESICK_LEVEL: &str = "homesick_level";
pub const MESS_FOOD_RATING: &str = "mess_food_rating";
pub const SPORTS_PARTICIPATION: &str = "sports_participation";
pub const SOCIAL_ACTIVITIES: &str = "social_activities";
pub const STUDY_HOURS: &str = "study_hours";
pub const SCREEN_TIME: &str = "screen_time";

pub const FIELD_COUNT: usize = 10;

pub static FIELDS: [FieldSpec; FIELD_COUNT] = [
    FieldSpec {
        name: SLEEP_HOURS,
        label: "Sleep hours",
        prompt: "How many hours do you sleep per night?",
        hint: None,
        kind: FieldKind::Integer { min: 1, max: 24 },
    },
    FieldSpec {
        name: ACADEMIC_PERFORMANCE,
        label: "Academic performance",
        prompt: "Academic performance:",
        hint: None,
        kind: FieldKind::Academic,
    },
    FieldSpec {
        name: BULLIED,
        label: "Bullied recently",
        prompt: "Have you been bullied recently?",
        hint: None,
        kind: FieldKind::YesNo,
    },
    FieldSpec {
        name: HAS_CLOSE_FRIENDS,
        label: "Close friends at school",
        prompt: "Do you have close friends at school?",
        hint: None,
        kind: FieldKind::YesNo,
    },
    FieldSpec {
        name: HOMESICK_LEVEL,
        label: "Homesick level",
        prompt: "How homesick do you feel?",
        hint: Some("[1=Not at all, 5=Extremely]"),
        kind: FieldKind::Integer { min: 1, max: 5 },
    },
    FieldSpec {
        name: MESS_FOOD_RATING,
        label: "Mess food rating",
        prompt: "How do you rate the mess food?",
        hint: Some("[1=Very bad, 5=Excellent]"),
        kind: FieldKind::Integer { min: 1, max: 5 },
    },
    FieldSpec {
        name: SPORTS_PARTICIPATION,
        label: "Sports participation",
        prompt: "Do you participate in sports?",
        hint: None,
        kind: FieldKind::YesNo,
    },
    FieldSpec {
        name: SOCIAL_ACTIVITIES,
        label: "Social activities",
        prompt: "How do you rate your social activities?",
        hint: None,
        kind: FieldKind::Integer { min: 0, max: 10 },
    },
    FieldSpec {
        name: STUDY_HOURS,
        label: "Study hours",
        prompt: "How many hours do you study per day?",
        hint: None,
        kind: FieldKind::Integer { min: 0, max: 24 },
    },
    FieldSpec {
        name: SCREEN_TIME,
        label: "Screen time",
        prompt: "How many hours of screen time per day?",
        hint: None,
        kind: FieldKind::Integer { min: 0, max: 24 },
    },
];

/// Look up a field by its wire name
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

/// Position of a field in the canonical order
pub fn field_index(name: &str) -> Option<usize> {
    FIELDS.iter().position(|f| f.name == name)
}

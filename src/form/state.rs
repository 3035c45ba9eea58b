//! Raw form state and validation
//!
//! `FormState` keeps every field as the text the user typed. Nothing is
//! interpreted until `validate`, which either yields a typed `Answers` or the
//! first offending field. Empty fields are reported before any parsing.

use crate::errors::{ValidationError, ValidationKind};
use crate::form::answers::{parse_yes_no, yes_no_label, AcademicPerformance, Answers};
use crate::form::fields::{field_index, FieldKind, FieldSpec, FIELDS, FIELD_COUNT};

/// In-memory questionnaire record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: [String; FIELD_COUNT],
    academic_options: Vec<String>,
}

impl FormState {
    /// Empty form with the built-in academic options
    pub fn new() -> Self {
        Self {
            values: Default::default(),
            academic_options: AcademicPerformance::default_options(),
        }
    }

    /// Replace the academic options offered by the form
    ///
    /// Labels that do not name a known performance level are dropped and
    /// returned. An empty result keeps the built-in options.
    pub fn set_academic_options(&mut self, options: Vec<String>) -> Vec<String> {
        let (known, unknown): (Vec<String>, Vec<String>) = options
            .into_iter()
            .partition(|o| o.parse::<AcademicPerformance>().is_ok());

        if !known.is_empty() {
            self.academic_options = known;
        }
        unknown
    }

    pub fn academic_options(&self) -> &[String] {
        &self.academic_options
    }

    /// Set the raw value of a field; returns false for unknown field names
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match field_index(name) {
            Some(idx) => {
                self.values[idx] = value.into().trim().to_string();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        field_index(name).map(|idx| self.values[idx].as_str())
    }

    /// Iterate fields with their current raw values, in canonical order
    pub fn entries(&self) -> impl Iterator<Item = (&'static FieldSpec, &str)> {
        FIELDS.iter().zip(self.values.iter().map(String::as_str))
    }

    pub fn is_blank(&self) -> bool {
        self.values.iter().all(String::is_empty)
    }

    /// Clear every field back to empty; academic options are kept
    pub fn reset(&mut self) {
        self.values = Default::default();
    }

    /// Fill the form from a validated answer set
    pub fn from_answers(answers: &Answers) -> Self {
        let mut form = Self::new();
        form.set("sleep_hours", answers.sleep_hours.to_string());
        form.set("academic_performance", answers.academic_performance.label());
        form.set("bullied", yes_no_label(answers.bullied));
        form.set("has_close_friends", yes_no_label(answers.has_close_friends));
        form.set("homesick_level", answers.homesick_level.to_string());
        form.set("mess_food_rating", answers.mess_food_rating.to_string());
        form.set("sports_participation", yes_no_label(answers.sports_participation));
        form.set("social_activities", answers.social_activities.to_string());
        form.set("study_hours", answers.study_hours.to_string());
        form.set("screen_time", answers.screen_time.to_string());
        form
    }

    /// Validate a single field's raw value
    pub fn check_field(&self, spec: &'static FieldSpec, raw: &str) -> Result<(), ValidationError> {
        self.parse_field(spec, raw).map(|_| ())
    }

    /// Validate the whole form
    pub fn validate(&self) -> Result<Answers, ValidationError> {
        if let Some((spec, _)) = self.entries().find(|(_, raw)| raw.is_empty()) {
            return Err(ValidationError::new(spec.name, spec.label, ValidationKind::Missing));
        }

        let mut parsed = [Parsed::Number(0); FIELD_COUNT];
        for (idx, (spec, raw)) in self.entries().enumerate() {
            parsed[idx] = self.parse_field(spec, raw)?;
        }

        Ok(Answers {
            sleep_hours: parsed[0].number(),
            academic_performance: parsed[1].academic(),
            bullied: parsed[2].flag(),
            has_close_friends: parsed[3].flag(),
            homesick_level: parsed[4].number(),
            mess_food_rating: parsed[5].number(),
            sports_participation: parsed[6].flag(),
            social_activities: parsed[7].number(),
            study_hours: parsed[8].number(),
            screen_time: parsed[9].number(),
        })
    }

    fn parse_field(&self, spec: &'static FieldSpec, raw: &str) -> Result<Parsed, ValidationError> {
        let raw = raw.trim();
        let fail = |kind| ValidationError::new(spec.name, spec.label, kind);

        if raw.is_empty() {
            return Err(fail(ValidationKind::Missing));
        }

        match spec.kind {
            FieldKind::Integer { min, max } => {
                let value: i64 = raw.parse().map_err(|_| fail(ValidationKind::NotANumber))?;
                if value < min as i64 || value > max as i64 {
                    return Err(fail(ValidationKind::OutOfRange { min, max }));
                }
                Ok(Parsed::Number(value as u8))
            }
            FieldKind::Academic => {
                let offered = self
                    .academic_options
                    .iter()
                    .any(|o| o.eq_ignore_ascii_case(raw));
                match raw.parse::<AcademicPerformance>() {
                    Ok(level) if offered => Ok(Parsed::Academic(level)),
                    _ => Err(fail(ValidationKind::UnknownOption {
                        options: self.academic_options.clone(),
                    })),
                }
            }
            FieldKind::YesNo => parse_yes_no(raw).map(Parsed::Flag).ok_or_else(|| {
                fail(ValidationKind::UnknownOption {
                    options: vec!["Yes".to_string(), "No".to_string()],
                })
            }),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
enum Parsed {
    Number(u8),
    Academic(AcademicPerformance),
    Flag(bool),
}

// Field kinds are fixed by FIELDS, so each slot always holds the matching variant.
impl Parsed {
    fn number(self) -> u8 {
        match self {
            Parsed::Number(n) => n,
            _ => 0,
        }
    }

    fn academic(self) -> AcademicPerformance {
        match self {
            Parsed::Academic(a) => a,
            _ => AcademicPerformance::Average,
        }
    }

    fn flag(self) -> bool {
        matches!(self, Parsed::Flag(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    pub(crate) fn filled() -> FormState {
        let mut form = FormState::new();
        form.set("sleep_hours", "7");
        form.set("academic_performance", "Average");
        form.set("bullied", "No");
        form.set("has_close_friends", "Yes");
        form.set("homesick_level", "2");
        form.set("mess_food_rating", "3");
        form.set("sports_participation", "Yes");
        form.set("social_activities", "5");
        form.set("study_hours", "4");
        form.set("screen_time", "3");
        form
    }

    #[test]
    fn test_valid_form() {
        let answers = filled().validate().unwrap();
        assert_eq!(answers.sleep_hours, 7);
        assert_eq!(answers.academic_performance, AcademicPerformance::Average);
        assert!(!answers.bullied);
        assert!(answers.has_close_friends);
        assert!(answers.sports_participation);
        assert_eq!(answers.screen_time, 3);
    }

    #[test]
    fn test_each_empty_field_is_reported() {
        for spec in FIELDS.iter() {
            let mut form = filled();
            form.set(spec.name, "");
            let err = form.validate().unwrap_err();
            assert_eq!(err.field, spec.name);
            assert_eq!(err.kind, ValidationKind::Missing);
        }
    }

    #[test]
    fn test_missing_reported_before_parse_errors() {
        let mut form = filled();
        form.set("sleep_hours", "abc");
        form.set("screen_time", "");
        let err = form.validate().unwrap_err();
        assert_eq!(err.field, "screen_time");
        assert_eq!(err.kind, ValidationKind::Missing);
    }

    #[test]
    fn test_not_a_number() {
        let mut form = filled();
        form.set("study_hours", "four");
        assert_eq!(form.validate().unwrap_err().kind, ValidationKind::NotANumber);
    }

    #[test]
    fn test_unknown_choice() {
        let mut form = filled();
        form.set("bullied", "sometimes");
        assert!(matches!(
            form.validate().unwrap_err().kind,
            ValidationKind::UnknownOption { .. }
        ));
    }

    #[quickcheck]
    fn prop_numeric_bounds_enforced(value: i16, field_pick: usize) -> bool {
        let numeric: Vec<_> = FIELDS.iter().filter(|f| f.is_numeric()).collect();
        let spec = numeric[field_pick % numeric.len()];
        let (min, max) = spec.bounds().unwrap();

        let mut form = filled();
        form.set(spec.name, value.to_string());
        let in_range = value >= min as i16 && value <= max as i16;

        match form.validate() {
            Ok(_) => in_range,
            Err(err) => {
                !in_range
                    && err.field == spec.name
                    && err.kind == ValidationKind::OutOfRange { min, max }
            }
        }
    }

    #[test]
    fn test_reset_clears_values() {
        let mut form = filled();
        form.reset();
        assert!(form.is_blank());
        assert_eq!(form, FormState::new());
    }

    #[test]
    fn test_from_answers_round_trips_through_validate() {
        let answers = filled().validate().unwrap();
        assert_eq!(FormState::from_answers(&answers).validate().unwrap(), answers);
    }

    #[test]
    fn test_academic_options_filtering() {
        let mut form = filled();
        let dropped = form.set_academic_options(vec![
            "Poor".to_string(),
            "Good".to_string(),
            "Outstanding".to_string(),
        ]);
        assert_eq!(dropped, vec!["Outstanding".to_string()]);
        assert_eq!(form.academic_options(), &["Poor".to_string(), "Good".to_string()]);

        // Average is no longer offered
        assert!(form.validate().is_err());
        form.set("academic_performance", "good");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_empty_options_keep_defaults() {
        let mut form = FormState::new();
        form.set_academic_options(vec!["Unknown".to_string()]);
        assert_eq!(form.academic_options().len(), 3);
    }

    #[test]
    fn test_set_unknown_field() {
        let mut form = FormState::new();
        assert!(!form.set("favourite_colour", "blue"));
        assert!(form.get("favourite_colour").is_none());
    }
}

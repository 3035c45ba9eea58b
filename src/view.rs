//! Result view
//!
//! Turns an assessment into the lines shown on the terminal. Rendering is
//! plain text so it can be checked without a terminal; colour is applied by
//! the display manager.

use std::io::{self, Write};

use crate::assessment::Assessment;
use crate::form::{AcademicPerformance, Answers};
use crate::scoring::{severity_band, severity_for_label};

/// Shown under every result
pub const IMPORTANT_NOTE: &str = "This assessment is for educational purposes only and is not a substitute for professional medical advice, diagnosis, or treatment.";

/// Everything the result screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub label: String,
    pub severity: u8,
    pub band: &'static str,
    pub summary: String,
    pub items: Vec<String>,
    /// (area, comment) pairs about the submitted answers
    pub factors: Vec<(&'static str, &'static str)>,
}

impl ResultView {
    pub fn new(assessment: &Assessment, answers: &Answers) -> Self {
        let severity = severity_for_label(&assessment.condition);
        let summary = if assessment.is_normal() {
            "Your responses indicate a healthy mental state. Continue maintaining good habits and self-care practices.".to_string()
        } else {
            format!(
                "Your responses indicate potential signs of {}. This is not a clinical diagnosis, but suggests areas that may benefit from attention.",
                assessment.condition.to_lowercase()
            )
        };

        Self {
            label: assessment.condition.clone(),
            severity,
            band: severity_band(severity),
            summary,
            items: assessment.recommendations.clone(),
            factors: contributing_factors(answers),
        }
    }

    /// Plain-text rendering, one recommendation per `  - ` line
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Condition: {}\n", self.label));
        out.push_str(&format!("Severity:  {}/10 ({})\n\n", self.severity, self.band));
        out.push_str(&self.summary);
        out.push_str("\n\nRecommendations:\n");
        for item in &self.items {
            out.push_str(&format!("  - {}\n", item));
        }
        out.push_str("\nContributing Factors:\n");
        for (area, comment) in &self.factors {
            out.push_str(&format!("  {:<18} {}\n", format!("{}:", area), comment));
        }
        out.push_str(&format!("\nImportant Note: {}\n", IMPORTANT_NOTE));
        out
    }
}

/// Comments on sleep, academics, physical activity and social support
pub fn contributing_factors(answers: &Answers) -> Vec<(&'static str, &'static str)> {
    let sleep = if answers.sleep_hours < 6 {
        "Insufficient sleep can impact mental health."
    } else if answers.sleep_hours > 9 {
        "Excessive sleep may indicate underlying issues."
    } else {
        "Your sleep duration is within a healthy range."
    };

    let academic = match answers.academic_performance {
        AcademicPerformance::Poor => "Academic struggles can contribute to mental stress.",
        AcademicPerformance::Average => "Balanced academic performance is positive.",
        AcademicPerformance::Good => "Strong academic performance is a protective factor.",
    };

    let activity = if answers.sports_participation {
        "Regular physical activity benefits mental health."
    } else {
        "Consider increasing physical activity for better mental health."
    };

    let social = if answers.has_close_friends {
        "Having close friends provides important social support."
    } else {
        "Building social connections can improve mental wellbeing."
    };

    vec![
        ("Sleep", sleep),
        ("Academic", academic),
        ("Physical Activity", activity),
        ("Social Support", social),
    ]
}

/// Write the outcome of a non-interactive submit; JSON mode writes nothing
/// but the assessment document
pub fn write_report(
    out: &mut impl Write,
    assessment: &Assessment,
    answers: &Answers,
    json: bool,
) -> io::Result<()> {
    if json {
        let document = serde_json::to_string_pretty(assessment)?;
        writeln!(out, "{}", document)
    } else {
        writeln!(out, "{}", ResultView::new(assessment, answers).render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::AssessmentSource;

    fn answers() -> Answers {
        Answers {
            sleep_hours: 7,
            academic_performance: AcademicPerformance::Average,
            bullied: false,
            has_close_friends: true,
            homesick_level: 2,
            mess_food_rating: 3,
            sports_participation: true,
            social_activities: 5,
            study_hours: 4,
            screen_time: 3,
        }
    }

    fn factor(answers: &Answers, area: &str) -> &'static str {
        contributing_factors(answers)
            .into_iter()
            .find(|(a, _)| *a == area)
            .map(|(_, comment)| comment)
            .unwrap()
    }

    #[test]
    fn test_normal_with_three_items() {
        let assessment = Assessment::new(
            "Normal",
            vec!["Sleep well.".into(), "Eat well.".into(), "Move daily.".into()],
            AssessmentSource::Mock,
        );
        let view = ResultView::new(&assessment, &answers());
        let rendered = view.render();

        assert_eq!(view.label, "Normal");
        assert_eq!(rendered.lines().filter(|l| l.starts_with("  - ")).count(), 3);
        assert!(rendered.starts_with("Condition: Normal\n"));
        assert!(view.summary.contains("healthy mental state"));
        assert!(view.band.starts_with("Mild"));
    }

    #[test]
    fn test_non_normal_summary_uses_lowercase_label() {
        let assessment = Assessment::new("Bipolar Disorder", vec![], AssessmentSource::Local);
        let view = ResultView::new(&assessment, &answers());
        assert!(view.summary.contains("potential signs of bipolar disorder"));
        assert_eq!(view.severity, 8);
        assert!(view.items.is_empty());
    }

    #[test]
    fn test_sleep_factor_boundaries() {
        let at = |hours| factor(&Answers { sleep_hours: hours, ..answers() }, "Sleep");
        assert_eq!(at(5), "Insufficient sleep can impact mental health.");
        assert_eq!(at(6), "Your sleep duration is within a healthy range.");
        assert_eq!(at(9), "Your sleep duration is within a healthy range.");
        assert_eq!(at(10), "Excessive sleep may indicate underlying issues.");
    }

    #[test]
    fn test_academic_factor_per_level() {
        let at = |level| factor(&Answers { academic_performance: level, ..answers() }, "Academic");
        assert_eq!(at(AcademicPerformance::Poor), "Academic struggles can contribute to mental stress.");
        assert_eq!(at(AcademicPerformance::Average), "Balanced academic performance is positive.");
        assert_eq!(at(AcademicPerformance::Good), "Strong academic performance is a protective factor.");
    }

    #[test]
    fn test_activity_and_social_factors() {
        let active = answers();
        let isolated = Answers {
            sports_participation: false,
            has_close_friends: false,
            ..answers()
        };

        assert_eq!(factor(&active, "Physical Activity"), "Regular physical activity benefits mental health.");
        assert_eq!(
            factor(&isolated, "Physical Activity"),
            "Consider increasing physical activity for better mental health."
        );
        assert_eq!(factor(&active, "Social Support"), "Having close friends provides important social support.");
        assert_eq!(
            factor(&isolated, "Social Support"),
            "Building social connections can improve mental wellbeing."
        );
    }

    #[test]
    fn test_render_includes_factors_and_note() {
        let assessment = Assessment::new("Stress", vec!["Rest.".into()], AssessmentSource::Local);
        let rendered = ResultView::new(&assessment, &answers()).render();

        assert!(rendered.contains("Contributing Factors:"));
        assert!(rendered.contains("Sleep:"));
        assert!(rendered.contains("Social Support:"));
        assert!(rendered.contains(IMPORTANT_NOTE));
        assert_eq!(rendered.lines().filter(|l| l.starts_with("  - ")).count(), 1);
    }

    #[test]
    fn test_json_report_is_the_only_output() {
        let assessment = Assessment::new("Normal", vec!["Rest.".into()], AssessmentSource::Mock);
        let mut out = Vec::new();
        write_report(&mut out, &assessment, &answers(), true).unwrap();

        let parsed: Assessment = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, assessment);
    }

    #[test]
    fn test_text_report_renders_view() {
        let assessment = Assessment::new("Normal", vec!["Rest.".into()], AssessmentSource::Mock);
        let mut out = Vec::new();
        write_report(&mut out, &assessment, &answers(), false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Condition: Normal"));
    }
}

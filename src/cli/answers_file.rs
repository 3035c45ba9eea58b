//! Answers files for non-interactive submission
//!
//! A flat table of the ten fields, TOML or JSON by extension:
//!
//! ```toml
//! sleep_hours = 7
//! academic_performance = "Good"
//! bullied = "No"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::{AppError, Result};
use crate::form::{field, FormState};

/// Read an answers file into a form
pub fn load_into(path: &Path, form: &mut FormState) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::AnswersFile(format!("{}: {}", path.display(), e)))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let values = if is_json {
        parse_json(&content)?
    } else {
        parse_toml(&content)?
    };

    apply(form, values)
}

/// Apply `FIELD=VALUE` overrides on top of whatever the form holds
pub fn apply(form: &mut FormState, values: impl IntoIterator<Item = (String, String)>) -> Result<()> {
    for (name, value) in values {
        if field(&name).is_none() || !form.set(&name, value) {
            return Err(AppError::AnswersFile(format!("unknown field '{}'", name)));
        }
    }
    Ok(())
}

fn parse_toml(content: &str) -> Result<BTreeMap<String, String>> {
    let table: toml::Table = content
        .parse()
        .map_err(|e: toml::de::Error| AppError::AnswersFile(e.to_string()))?;

    table
        .into_iter()
        .map(|(name, value)| {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Boolean(b) => yes_no(b).to_string(),
                other => {
                    return Err(AppError::AnswersFile(format!(
                        "{} has an unsupported value: {}",
                        name, other
                    )))
                }
            };
            Ok((name, text))
        })
        .collect()
}

fn parse_json(content: &str) -> Result<BTreeMap<String, String>> {
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)
        .map_err(|e| AppError::AnswersFile(e.to_string()))?;

    object
        .into_iter()
        .map(|(name, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => yes_no(b).to_string(),
                other => {
                    return Err(AppError::AnswersFile(format!(
                        "{} has an unsupported value: {}",
                        name, other
                    )))
                }
            };
            Ok((name, text))
        })
        .collect()
}

fn yes_no(value: bool) -> &'static str {
    crate::form::answers::yes_no_label(value)
}

//! Built-in flow content: question text, quick replies, validation rules,
//! and summary templates. The engine treats all of this as data.

pub mod hydration;
pub mod injury_triage;
pub mod nutrition_goals;

use crate::flow::{CatalogError, FlowStep, ValidatorFn};
use crate::shared::{FlowId, StepId};
use std::collections::BTreeMap;

pub(crate) fn flow_id(raw: &str) -> Result<FlowId, CatalogError> {
    FlowId::parse(raw).map_err(CatalogError::InvalidIdentifier)
}

pub(crate) fn step_id(raw: &str) -> Result<StepId, CatalogError> {
    StepId::parse(raw).map_err(CatalogError::InvalidIdentifier)
}

pub(crate) fn ask(
    id: &str,
    prompt: &str,
    quick: &[&str],
    validator: Option<ValidatorFn>,
) -> Result<FlowStep, CatalogError> {
    Ok(FlowStep {
        quick_replies: quick.iter().map(|reply| reply.to_string()).collect(),
        validator,
        ..FlowStep::question(step_id(id)?, prompt)
    })
}

pub fn validate_yes_no(input: &str) -> Result<(), String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "yes" | "no" | "y" | "n" => Ok(()),
        _ => Err("Please answer `yes` or `no`.".to_string()),
    }
}

pub fn validate_positive_number(input: &str) -> Result<(), String> {
    match input.trim().parse::<f64>() {
        Ok(value) if value > 0.0 && value.is_finite() => Ok(()),
        _ => Err("Please enter a number greater than zero, for example `72.5`.".to_string()),
    }
}

pub fn validate_integer_range(input: &str, min: u32, max: u32) -> Result<(), String> {
    match input.trim().parse::<u32>() {
        Ok(value) if value >= min && value <= max => Ok(()),
        _ => Err(format!(
            "Please enter a whole number between {min} and {max}."
        )),
    }
}

pub(crate) fn collected_or<'a>(collected: &'a BTreeMap<String, String>, field: &str) -> &'a str {
    collected
        .get(field)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or("not provided")
}

// Title, one `label: value` line per row, a blank line, then the footer.
pub(crate) fn report(title: &str, rows: &[(&str, String)], footer: &[String]) -> String {
    let mut lines = vec![title.to_string()];
    lines.extend(rows.iter().map(|(label, value)| format!("{label}: {value}")));
    lines.push(String::new());
    lines.extend(footer.iter().cloned());
    lines.join("\n")
}

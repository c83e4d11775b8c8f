use super::{ask, collected_or, flow_id, report, step_id, validate_integer_range};
use crate::flow::{CatalogError, FlowDefinition, FlowStep};
use std::collections::BTreeMap;

pub fn validate_daily_glasses(input: &str) -> Result<(), String> {
    validate_integer_range(input, 0, 30)
        .map_err(|_| "Please answer with a whole number of glasses, from 0 to 30.".to_string())
}

pub fn validate_training_days(input: &str) -> Result<(), String> {
    validate_integer_range(input, 0, 7)
        .map_err(|_| "Training days per week must be a whole number from 0 to 7.".to_string())
}

pub fn render_summary(collected: &BTreeMap<String, String>) -> String {
    let glasses = collected
        .get("dailyGlasses")
        .and_then(|raw| raw.trim().parse::<u32>().ok());
    let advice = match glasses {
        Some(count) if count < 6 => {
            "That is on the low side. Try adding a glass with every meal and one around training."
        }
        Some(_) => "Good baseline. Keep an extra 500ml within reach on training days.",
        None => "Aim for roughly 6-8 glasses spread across the day as a starting point.",
    };
    let value = |field: &str| collected_or(collected, field).to_string();
    let rows = [
        (
            "Typical intake",
            format!("{} glasses/day", value("dailyGlasses")),
        ),
        ("Training days per week", value("trainingDays")),
        ("Climate", value("climate")),
    ];
    report("Hydration check summary", &rows, &[advice.to_string()])
}

pub fn definition() -> Result<FlowDefinition, CatalogError> {
    Ok(FlowDefinition {
        id: flow_id("hydration_check")?,
        title: "Hydration check".to_string(),
        description: "A quick look at your daily fluid intake with a tailored recommendation."
            .to_string(),
        steps: vec![
            ask(
                "dailyGlasses",
                "How many glasses of water do you drink on a typical day?",
                &["4", "6", "8"],
                Some(validate_daily_glasses),
            )?,
            ask(
                "trainingDays",
                "How many days per week do you train?",
                &["2", "3", "5"],
                Some(validate_training_days),
            )?,
            ask(
                "climate",
                "How would you describe your climate?",
                &["temperate", "hot", "humid"],
                None,
            )?,
            FlowStep::summary(step_id("summary")?, "Here is your hydration check result."),
        ],
        summary: render_summary,
    })
}

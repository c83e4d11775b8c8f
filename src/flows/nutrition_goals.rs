use super::{ask, collected_or, flow_id, report, step_id, validate_positive_number};
use crate::flow::{CatalogError, FlowDefinition, FlowStep};
use std::collections::BTreeMap;

pub fn validate_goal(input: &str) -> Result<(), String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "lose" | "maintain" | "gain" => Ok(()),
        _ => Err("Please pick one of `lose`, `maintain` or `gain`.".to_string()),
    }
}

pub fn render_summary(collected: &BTreeMap<String, String>) -> String {
    let value = |field: &str| collected_or(collected, field).to_string();
    let rows = [
        ("Goal", format!("{} weight", value("goal"))),
        ("Current weight", format!("{} kg", value("currentWeight"))),
        ("Target weight", format!("{} kg", value("targetWeight"))),
        ("Activity level", value("activityLevel")),
        ("Dietary restrictions", value("restrictions")),
    ];
    let footer = ["Your daily calorie target and macro split will be adjusted to match this goal."
        .to_string()];
    report("Nutrition goal summary", &rows, &footer)
}

pub fn definition() -> Result<FlowDefinition, CatalogError> {
    Ok(FlowDefinition {
        id: flow_id("nutrition_goal_setup")?,
        title: "Nutrition goal setup".to_string(),
        description: "Set up or refresh your weight goal so meal tracking targets stay accurate."
            .to_string(),
        steps: vec![
            ask(
                "goal",
                "What is your current goal: lose, maintain, or gain weight?",
                &["lose", "maintain", "gain"],
                Some(validate_goal),
            )?,
            ask(
                "currentWeight",
                "What is your current weight in kilograms?",
                &[],
                Some(validate_positive_number),
            )?,
            ask(
                "targetWeight",
                "What weight would you like to reach, in kilograms?",
                &[],
                Some(validate_positive_number),
            )?,
            ask(
                "activityLevel",
                "How active are you in a typical week?",
                &["sedentary", "light", "moderate", "high"],
                None,
            )?,
            ask(
                "restrictions",
                "Any dietary restrictions or foods you avoid? Say `none` if not.",
                &["none", "vegetarian", "vegan", "gluten-free"],
                None,
            )?,
            FlowStep::summary(
                step_id("summary")?,
                "All set! Here is your updated nutrition goal.",
            ),
        ],
        summary: render_summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_accepts_the_three_directions_only() {
        assert!(validate_goal("lose").is_ok());
        assert!(validate_goal("MAINTAIN").is_ok());
        assert!(validate_goal("bulk").is_err());
    }

    #[test]
    fn summary_reflects_collected_fields() {
        let mut collected = BTreeMap::new();
        collected.insert("goal".to_string(), "lose".to_string());
        collected.insert("currentWeight".to_string(), "82".to_string());
        collected.insert("targetWeight".to_string(), "76".to_string());
        let rendered = render_summary(&collected);
        assert!(rendered.contains("Goal: lose weight"));
        assert!(rendered.contains("Current weight: 82 kg"));
        assert!(rendered.contains("Target weight: 76 kg"));
        assert!(rendered.contains("Activity level: not provided"));
    }
}

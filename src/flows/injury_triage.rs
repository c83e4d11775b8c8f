use super::{ask, collected_or, flow_id, report, step_id, validate_yes_no};
use crate::flow::{CatalogError, FlowDefinition, FlowStep};
use std::collections::BTreeMap;

pub fn validate_body_area(input: &str) -> Result<(), String> {
    if input.trim().chars().count() < 3 {
        return Err(
            "Please describe where it hurts in a bit more detail, for example `left knee`."
                .to_string(),
        );
    }
    Ok(())
}

pub fn validate_pain_scale(input: &str) -> Result<(), String> {
    super::validate_integer_range(input, 0, 10)
        .map_err(|_| "Pain level must be a whole number from 0 to 10.".to_string())
}

const RECOMMENDATIONS: [&str; 6] = [
    "1. Reduce load on the affected area for the next few days.",
    "2. Apply ice for 15-20 minutes, a few times per day.",
    "3. Keep up gentle, pain-free range-of-motion work.",
    "4. Skip any training that reproduces the pain.",
    "5. Reassess after 48-72 hours of relative rest.",
    "6. See a medical professional if symptoms worsen or red flags appear.",
];

pub fn render_summary(collected: &BTreeMap<String, String>) -> String {
    let value = |field: &str| collected_or(collected, field).to_string();
    let rows = [
        ("Location", value("area")),
        ("Onset", value("onset")),
        ("Pain level", format!("{}/10", value("painLevel"))),
        ("Training context", value("trainingContext")),
        (
            "Red flags (numbness, swelling, instability)",
            value("redFlags"),
        ),
        ("Tried so far", value("selfCare")),
    ];
    let mut footer = vec!["Recommended next steps:".to_string()];
    footer.extend(RECOMMENDATIONS.iter().map(|line| line.to_string()));
    report("Injury check-in summary", &rows, &footer)
}

pub fn definition() -> Result<FlowDefinition, CatalogError> {
    Ok(FlowDefinition {
        id: flow_id("injury_triage")?,
        title: "Injury check-in".to_string(),
        description: "A few questions to understand a training niggle and suggest safe next steps."
            .to_string(),
        steps: vec![
            ask(
                "area",
                "Sorry to hear something hurts. Where is the pain located?",
                &["knee", "shoulder", "lower back", "ankle"],
                Some(validate_body_area),
            )?,
            ask(
                "onset",
                "When did the pain start?",
                &["today", "this week", "over a month ago"],
                None,
            )?,
            ask(
                "painLevel",
                "On a scale of 0 to 10, how strong is the pain right now?",
                &["2", "5", "8"],
                Some(validate_pain_scale),
            )?,
            ask(
                "trainingContext",
                "What were you doing when it started, and have you trained on it since?",
                &[],
                None,
            )?,
            ask(
                "redFlags",
                "Any numbness, significant swelling, or a feeling of instability?",
                &["yes", "no"],
                Some(validate_yes_no),
            )?,
            ask(
                "selfCare",
                "Have you tried anything for it so far (rest, ice, stretching)?",
                &[],
                None,
            )?,
            FlowStep::summary(
                step_id("summary")?,
                "Thanks! Here is a summary of your check-in.",
            ),
        ],
        summary: render_summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_area_requires_some_detail() {
        assert!(validate_body_area("x").is_err());
        assert!(validate_body_area("  ok ").is_err());
        assert!(validate_body_area("left knee").is_ok());
    }

    #[test]
    fn pain_scale_bounds() {
        assert!(validate_pain_scale("0").is_ok());
        assert!(validate_pain_scale("10").is_ok());
        assert!(validate_pain_scale("11").is_err());
        assert!(validate_pain_scale("bad").is_err());
    }

    #[test]
    fn summary_names_the_location_and_all_six_recommendations() {
        let mut collected = BTreeMap::new();
        collected.insert("area".to_string(), "left knee".to_string());
        collected.insert("painLevel".to_string(), "5".to_string());
        let rendered = render_summary(&collected);
        assert!(rendered.contains("Location: left knee"));
        assert!(rendered.contains("Pain level: 5/10"));
        for recommendation in RECOMMENDATIONS {
            assert!(rendered.contains(recommendation));
        }
        assert!(rendered.contains("Onset: not provided"));
    }
}

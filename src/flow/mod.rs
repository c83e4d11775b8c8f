pub mod catalog;

pub use catalog::{CatalogError, FlowCatalog};

use crate::shared::{FlowId, SessionId, StepId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Question,
    Summary,
}

/// `Err` carries the corrective re-prompt shown to the user.
pub type ValidatorFn = fn(&str) -> Result<(), String>;

pub type SummaryFn = fn(&BTreeMap<String, String>) -> String;

#[derive(Debug, Clone)]
pub struct FlowStep {
    pub id: StepId,
    pub kind: StepKind,
    pub prompt: String,
    pub quick_replies: Vec<String>,
    pub expected_field: Option<String>,
    pub validator: Option<ValidatorFn>,
    /// Explicit successor; absent means advance by catalog order.
    pub next: Option<StepId>,
}

impl FlowStep {
    pub fn question(id: StepId, prompt: impl Into<String>) -> Self {
        Self {
            id,
            kind: StepKind::Question,
            prompt: prompt.into(),
            quick_replies: Vec::new(),
            expected_field: None,
            validator: None,
            next: None,
        }
    }

    pub fn summary(id: StepId, prompt: impl Into<String>) -> Self {
        Self {
            kind: StepKind::Summary,
            ..Self::question(id, prompt)
        }
    }

    pub fn field_name(&self) -> &str {
        self.expected_field.as_deref().unwrap_or(self.id.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct FlowDefinition {
    pub id: FlowId,
    pub title: String,
    pub description: String,
    pub steps: Vec<FlowStep>,
    pub summary: SummaryFn,
}

impl FlowDefinition {
    pub fn first_step(&self) -> &FlowStep {
        // Catalog validation guarantees a non-empty step list.
        &self.steps[0]
    }

    pub fn step(&self, step_id: &StepId) -> Option<&FlowStep> {
        self.steps.iter().find(|step| &step.id == step_id)
    }

    pub fn step_after(&self, step_id: &StepId) -> &FlowStep {
        match self.steps.iter().position(|step| &step.id == step_id) {
            Some(index) if index + 1 < self.steps.len() => &self.steps[index + 1],
            Some(index) => &self.steps[index],
            None => self.first_step(),
        }
    }

    pub fn render_summary(&self, collected: &BTreeMap<String, String>) -> String {
        (self.summary)(collected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSummary {
    pub id: FlowId,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub id: StepId,
    pub kind: StepKind,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowResponse {
    pub flow_id: FlowId,
    pub session_id: SessionId,
    pub step: StepView,
    #[serde(default)]
    pub collected: BTreeMap<String, String>,
    pub complete: bool,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_nothing(_collected: &BTreeMap<String, String>) -> String {
        String::new()
    }

    fn two_step_flow() -> FlowDefinition {
        FlowDefinition {
            id: FlowId::parse("demo").expect("flow id"),
            title: "Demo".to_string(),
            description: "demo flow".to_string(),
            steps: vec![
                FlowStep::question(StepId::parse("first").expect("step id"), "First?"),
                FlowStep::summary(StepId::parse("summary").expect("step id"), "Done."),
            ],
            summary: render_nothing,
        }
    }

    #[test]
    fn field_name_defaults_to_step_id() {
        let step = FlowStep::question(StepId::parse("area").expect("step id"), "Where?");
        assert_eq!(step.field_name(), "area");
        let step = FlowStep {
            expected_field: Some("painLevel".to_string()),
            ..step
        };
        assert_eq!(step.field_name(), "painLevel");
    }

    #[test]
    fn step_after_advances_in_order_and_self_loops_at_the_end() {
        let flow = two_step_flow();
        let first = StepId::parse("first").expect("step id");
        let summary = StepId::parse("summary").expect("step id");
        assert_eq!(flow.step_after(&first).id, summary);
        assert_eq!(flow.step_after(&summary).id, summary);
    }

    #[test]
    fn step_after_recovers_to_first_step_for_unknown_ids() {
        let flow = two_step_flow();
        let missing = StepId::parse("missing").expect("step id");
        assert_eq!(flow.step_after(&missing).id.as_str(), "first");
    }
}

use super::{FlowDefinition, FlowSummary, StepKind};
use crate::shared::FlowId;
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate flow id `{flow_id}`")]
    DuplicateFlow { flow_id: String },
    #[error("flow `{flow_id}` has no steps")]
    EmptyFlow { flow_id: String },
    #[error("flow `{flow_id}` declares duplicate step id `{step_id}`")]
    DuplicateStep { flow_id: String, step_id: String },
    #[error("flow `{flow_id}` must end with a summary step, found `{step_id}`")]
    MissingTerminalSummary { flow_id: String, step_id: String },
    #[error("flow `{flow_id}` declares summary step `{step_id}` before the end")]
    EarlySummaryStep { flow_id: String, step_id: String },
    #[error("flow `{flow_id}` step `{step_id}` points at unknown next step `{next}`")]
    UnknownNextStep {
        flow_id: String,
        step_id: String,
        next: String,
    },
    #[error("flow content declares an invalid identifier: {0}")]
    InvalidIdentifier(String),
}

#[derive(Debug, Clone)]
pub struct FlowCatalog {
    flows: BTreeMap<FlowId, FlowDefinition>,
}

impl FlowCatalog {
    pub fn new(definitions: Vec<FlowDefinition>) -> Result<Self, CatalogError> {
        let mut flows = BTreeMap::new();
        for definition in definitions {
            validate_definition(&definition)?;
            let flow_id = definition.id.clone();
            if flows.insert(flow_id.clone(), definition).is_some() {
                return Err(CatalogError::DuplicateFlow {
                    flow_id: flow_id.to_string(),
                });
            }
        }
        Ok(Self { flows })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(vec![
            crate::flows::injury_triage::definition()?,
            crate::flows::nutrition_goals::definition()?,
            crate::flows::hydration::definition()?,
        ])
    }

    pub fn get(&self, flow_id: &FlowId) -> Option<&FlowDefinition> {
        self.flows.get(flow_id)
    }

    pub fn list(&self) -> Vec<FlowSummary> {
        self.flows
            .values()
            .map(|definition| FlowSummary {
                id: definition.id.clone(),
                title: definition.title.clone(),
                description: definition.description.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}

fn validate_definition(definition: &FlowDefinition) -> Result<(), CatalogError> {
    let flow_id = definition.id.to_string();
    let Some(last) = definition.steps.last() else {
        return Err(CatalogError::EmptyFlow { flow_id });
    };
    if last.kind != StepKind::Summary {
        return Err(CatalogError::MissingTerminalSummary {
            flow_id,
            step_id: last.id.to_string(),
        });
    }

    let mut seen = std::collections::BTreeSet::new();
    for (index, step) in definition.steps.iter().enumerate() {
        if !seen.insert(step.id.clone()) {
            return Err(CatalogError::DuplicateStep {
                flow_id: flow_id.clone(),
                step_id: step.id.to_string(),
            });
        }
        if step.kind == StepKind::Summary && index + 1 != definition.steps.len() {
            return Err(CatalogError::EarlySummaryStep {
                flow_id: flow_id.clone(),
                step_id: step.id.to_string(),
            });
        }
        if let Some(next) = &step.next {
            if definition.step(next).is_none() {
                return Err(CatalogError::UnknownNextStep {
                    flow_id: flow_id.clone(),
                    step_id: step.id.to_string(),
                    next: next.to_string(),
                });
            }
        }
    }
    Ok(())
}

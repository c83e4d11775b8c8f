use coachflow::flow::{FlowCatalog, StepKind};
use coachflow::shared::FlowId;

fn flow_id(raw: &str) -> FlowId {
    FlowId::parse(raw).expect("flow id")
}

#[test]
fn builtin_catalog_lists_the_shipped_flows() {
    let catalog = FlowCatalog::builtin().expect("catalog");
    let summaries = catalog.list();
    let ids: Vec<&str> = summaries
        .iter()
        .map(|summary| summary.id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec!["hydration_check", "injury_triage", "nutrition_goal_setup"]
    );
    for summary in &summaries {
        assert!(!summary.title.is_empty());
        assert!(!summary.description.is_empty());
    }
}

#[test]
fn builtin_flows_end_with_a_single_terminal_summary() {
    let catalog = FlowCatalog::builtin().expect("catalog");
    for summary in catalog.list() {
        let definition = catalog.get(&summary.id).expect("definition");
        let last = definition.steps.last().expect("steps");
        assert_eq!(last.kind, StepKind::Summary);
        let summary_steps = definition
            .steps
            .iter()
            .filter(|step| step.kind == StepKind::Summary)
            .count();
        assert_eq!(summary_steps, 1, "flow {}", definition.id);
    }
}

#[test]
fn get_returns_none_for_unknown_flow() {
    let catalog = FlowCatalog::builtin().expect("catalog");
    assert!(catalog.get(&flow_id("sleep_audit")).is_none());
}

#[test]
fn catalog_reports_its_size() {
    let catalog = FlowCatalog::builtin().expect("catalog");
    assert_eq!(catalog.len(), 3);
    assert!(!catalog.is_empty());
    let empty = FlowCatalog::new(Vec::new()).expect("empty catalog");
    assert!(empty.is_empty());
}
